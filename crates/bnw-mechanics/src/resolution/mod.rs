//! Turning a rolled pool into a result.
//!
//! The dice are folded into runs by [`reduce_runs`]; the highest run is
//! checked against the target by [`evaluate`]. [`resolve_pool`] does the whole
//! roll-reduce-evaluate sequence for one pool.

pub mod runs;

pub use runs::reduce_runs;

use serde::{Deserialize, Serialize};

use crate::dice::{DieOutcome, DieSource, roll_exploding};

/// The highest run and whether it met the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// The largest run total.
    pub highest: u32,
    /// True if `highest >= target`.
    pub success: bool,
}

/// Compare the highest run to the target number.
pub fn evaluate(runs: &[u32], target: u32) -> Evaluation {
    let highest = runs.iter().copied().max().unwrap_or(0);
    Evaluation {
        highest,
        success: highest >= target,
    }
}

/// Everything one pool roll produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Number of dice rolled before explosions.
    pub pool: u32,
    /// Every die, in roll order.
    pub dice: Vec<DieOutcome>,
    /// Run totals, in roll order.
    pub runs: Vec<u32>,
    /// The largest run total.
    pub highest: u32,
    /// The target number the roll was made against.
    pub target: u32,
    /// True if the highest run met the target.
    pub success: bool,
}

/// Roll a pool, reduce it to runs, and evaluate it against a target.
pub fn resolve_pool<S: DieSource + ?Sized>(pool: u32, target: u32, source: &mut S) -> RollOutcome {
    let dice = roll_exploding(pool, source);
    let runs = reduce_runs(&dice);
    let Evaluation { highest, success } = evaluate(&runs, target);
    RollOutcome {
        pool,
        dice,
        runs,
        highest,
        target,
        success,
    }
}
