use bnw_mechanics::{MechError, SystemConfig};

use super::RollOptions;

pub fn run(
    options: &RollOptions<'_>,
    actor: &str,
    item: &str,
    config: &SystemConfig,
) -> Result<(), String> {
    let campaign = super::open(options.file, config)?;
    let actor = super::find_actor(&campaign, actor)?;
    let power = actor
        .powers()
        .find(|p| p.name.eq_ignore_ascii_case(item))
        .ok_or_else(|| MechError::UnknownItem(item.to_string()).to_string())?;

    super::roll_at_table(options, config, |table| {
        table.roll_power(actor, power.id, options.target)
    })
}
