use bnw_mechanics::{RollRequest, SystemConfig};

use super::RollOptions;

pub fn run(
    options: &RollOptions<'_>,
    actor: &str,
    mut request: RollRequest,
    config: &SystemConfig,
) -> Result<(), String> {
    let campaign = super::open(options.file, config)?;
    let actor = super::find_actor(&campaign, actor)?;
    request.target = options.target;

    super::roll_at_table(options, config, |table| {
        table.roll_trait_skill(actor, &request)
    })
}
