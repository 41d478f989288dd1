//! Six-sided dice that explode on a six.
//!
//! A [`DieSource`] produces faces; [`roll_exploding`] turns a pool size into
//! the ordered list of [`DieOutcome`]s, with every die an explosion produced
//! placed directly after the die that caused it.

pub mod explode;
pub mod source;

pub use explode::{MAX_CHAIN, roll_exploding};
pub use source::{DieSource, RandomDice, ScriptedDice};

use serde::{Deserialize, Serialize};

/// Number of faces on every die.
pub const FACES: u32 = 6;

/// The face that triggers an explosion.
pub const EXPLODES_ON: u32 = FACES;

/// One rolled die, including dice added by explosions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieOutcome {
    /// The face rolled, 1 to 6.
    pub face: u32,
    /// True iff the face is a six and another die was chained after it.
    pub exploded: bool,
}

impl DieOutcome {
    /// A die showing `face`, marked exploded when it is the maximum face.
    pub fn new(face: u32) -> Self {
        Self {
            face,
            exploded: face == EXPLODES_ON,
        }
    }
}

impl std::fmt::Display for DieOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.exploded {
            write!(f, "{}!", self.face)
        } else {
            write!(f, "{}", self.face)
        }
    }
}
