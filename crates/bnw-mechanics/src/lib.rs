//! Rules engine for the Brave New World ruleset.
//!
//! A test rolls `trait + skill + bonus` six-sided dice. Every six explodes into
//! another die chained onto it; each chain is summed into a run, and the
//! highest run is compared to a target number. The crate also carries the
//! sheet view-models and the one-time migration from the old `body`/`mind`
//! trait taxonomy to `strength`/`speed`/`smarts`/`spirit`.
//!
//! Everything that touches the host (prompts, chat, settings, records) goes
//! through a trait so the engine can be driven without a tabletop.

pub mod config;
pub mod dice;
pub mod error;
pub mod migrate;
pub mod pool;
pub mod resolution;
pub mod roll;
pub mod sheet;
pub mod target;

pub use config::SystemConfig;
pub use dice::{DieOutcome, DieSource, RandomDice, ScriptedDice, roll_exploding};
pub use error::{MechError, MechResult};
pub use migrate::{MigrationReport, MigrationTable, Operator, ReadyOutcome, run_ready_migration};
pub use pool::pool_size;
pub use resolution::{Evaluation, RollOutcome, evaluate, reduce_runs, resolve_pool};
pub use roll::{
    ChatCard, ChatFlags, ChatPublisher, Notifications, PublishError, RollContext, RollRequest,
};
pub use sheet::ActorSheet;
pub use target::{PromptError, PromptReply, TargetPrompt, TargetResolver};
