use std::path::Path;

use bnw_mechanics::{ReadyOutcome, SystemConfig};
use colored::Colorize;

use crate::host::Seat;

pub fn run(file: &Path, player: bool, config: &SystemConfig) -> Result<(), String> {
    let seat = Seat {
        game_master: !player,
    };
    let (_, outcome) = super::open_as(file, config, &seat)?;

    match outcome {
        ReadyOutcome::NotPermitted => {
            println!("  Only the game master can migrate this campaign.");
        }
        ReadyOutcome::AlreadyComplete => {
            println!("  Trait migration already complete.");
        }
        ReadyOutcome::Migrated(report) => {
            println!(
                "  {} {} actor(s), {} item(s)",
                "Migrated".bold(),
                report.actors_updated,
                report.items_updated
            );
            for failure in &report.failures {
                println!(
                    "  {} {} ({}): {}",
                    "failed".red(),
                    failure.name,
                    failure.id,
                    failure.error
                );
            }
            if !report.flag_saved {
                println!(
                    "  {}",
                    "Completion flag not saved; the next run will check again.".yellow()
                );
            }
        }
    }

    Ok(())
}
