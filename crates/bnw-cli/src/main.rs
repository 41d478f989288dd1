//! CLI table host for the Brave New World ruleset.

mod commands;
mod host;

use std::path::{Path, PathBuf};
use std::process;

use bnw_mechanics::{RollRequest, SystemConfig};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bnw",
    about = "Brave New World: exploding dice pools and campaign upkeep",
    version,
    propagate_version = true
)]
struct Cli {
    /// JSON file overriding the system configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr (BNW_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a sample campaign with a legacy character
    Init {
        /// Campaign file to create
        path: PathBuf,
    },

    /// Show a character sheet
    Sheet {
        /// Actor name (case-insensitive)
        actor: String,

        /// Campaign file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Roll a trait, optionally with a skill
    Roll {
        /// Actor name (case-insensitive)
        actor: String,

        /// Trait key, e.g. strength
        #[arg(value_name = "TRAIT")]
        trait_key: String,

        /// Skill key, e.g. brawl
        skill: Option<String>,

        /// Extra dice (may be negative)
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        bonus: i64,

        /// Title for the chat card
        #[arg(short, long)]
        label: Option<String>,

        #[command(flatten)]
        dice: DiceArgs,
    },

    /// Roll one of an actor's powers
    Power {
        /// Actor name (case-insensitive)
        actor: String,

        /// Power name (case-insensitive)
        item: String,

        #[command(flatten)]
        dice: DiceArgs,
    },

    /// Run the legacy trait migration
    Migrate {
        /// Campaign file
        #[arg(short, long)]
        file: PathBuf,

        /// Act as a player instead of the game master
        #[arg(long)]
        player: bool,
    },
}

/// Options shared by the rolling commands.
#[derive(Args)]
struct DiceArgs {
    /// Campaign file
    #[arg(short, long)]
    file: PathBuf,

    /// Target number (asked for on stdin when absent)
    #[arg(short, long, allow_negative_numbers = true)]
    target: Option<i64>,

    /// RNG seed for a repeatable roll
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the chat card as JSON
    #[arg(long)]
    json: bool,
}

impl DiceArgs {
    fn options(&self) -> commands::RollOptions<'_> {
        commands::RollOptions {
            file: &self.file,
            target: self.target,
            seed: self.seed,
            json: self.json,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Init { path } => commands::init::run(&path),
        Commands::Sheet { actor, file } => commands::sheet::run(&file, &actor, &config),
        Commands::Roll {
            actor,
            trait_key,
            skill,
            bonus,
            label,
            dice,
        } => {
            let mut request = RollRequest::new(trait_key).with_bonus(bonus);
            if let Some(skill) = skill {
                request = request.with_skill(skill);
            }
            if let Some(label) = label {
                request = request.with_label(label);
            }
            commands::roll::run(&dice.options(), &actor, request, &config)
        }
        Commands::Power { actor, item, dice } => {
            commands::power::run(&dice.options(), &actor, &item, &config)
        }
        Commands::Migrate { file, player } => commands::migrate::run(&file, player, &config),
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("BNW_LOG").unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<SystemConfig, String> {
    match path {
        Some(path) => SystemConfig::load(path).map_err(|e| e.to_string()),
        None => Ok(SystemConfig::default()),
    }
}
