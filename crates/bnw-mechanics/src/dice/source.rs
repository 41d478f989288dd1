//! Where die faces come from.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::FACES;

/// A source of uniformly distributed die faces in `1..=6`.
///
/// This is the engine's only source of randomness. Tests swap in
/// [`ScriptedDice`] to get fixed sequences.
pub trait DieSource {
    /// Roll one die.
    fn roll_face(&mut self) -> u32;
}

/// Faces drawn from a random number generator.
#[derive(Debug, Clone)]
pub struct RandomDice<R = StdRng> {
    rng: R,
}

impl RandomDice<StdRng> {
    /// Deterministic dice from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Dice seeded from the operating system.
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomDice<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DieSource for RandomDice<R> {
    fn roll_face(&mut self) -> u32 {
        self.rng.random_range(1..=FACES)
    }
}

/// Faces replayed from a fixed list. Once the list runs out every further
/// die shows 1.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    faces: VecDeque<u32>,
    rolled: usize,
}

impl ScriptedDice {
    /// Replay the given faces in order.
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            rolled: 0,
        }
    }

    /// How many faces have been handed out so far.
    pub fn rolled(&self) -> usize {
        self.rolled
    }

    /// How many scripted faces are left.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DieSource for ScriptedDice {
    fn roll_face(&mut self) -> u32 {
        self.rolled += 1;
        self.faces.pop_front().unwrap_or(1)
    }
}
