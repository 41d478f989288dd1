//! The exploding-pool roller.

use super::source::DieSource;
use super::{DieOutcome, FACES};

/// Most dice a single initial die may add through explosions.
///
/// Chains are unbounded in principle; this only stops a broken source that
/// returns sixes forever. The six that ends a cut chain is not marked
/// exploded, since nothing was chained after it.
pub const MAX_CHAIN: usize = 100;

/// Upper bound on the up-front allocation, whatever pool is asked for.
const PREALLOC: u32 = 64;

/// Roll `pool` dice, chaining one extra die after every six.
///
/// The result holds every die in roll order: each initial die followed
/// immediately by the chain of dice its explosions produced. Its length is
/// `pool` plus the number of dice marked exploded.
pub fn roll_exploding<S: DieSource + ?Sized>(pool: u32, source: &mut S) -> Vec<DieOutcome> {
    let mut dice = Vec::with_capacity(pool.min(PREALLOC) as usize);
    for _ in 0..pool {
        let mut extra = 0;
        loop {
            let mut die = DieOutcome::new(source.roll_face().clamp(1, FACES));
            if die.exploded && extra == MAX_CHAIN {
                die.exploded = false;
            }
            dice.push(die);
            if !die.exploded {
                break;
            }
            extra += 1;
        }
    }
    dice
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{RandomDice, ScriptedDice};
    use proptest::prelude::*;

    #[test]
    fn no_sixes_rolls_exactly_pool() {
        let mut dice = ScriptedDice::new([1, 2, 3, 4]);
        let rolled = roll_exploding(4, &mut dice);
        assert_eq!(rolled.len(), 4);
        assert!(rolled.iter().all(|d| !d.exploded));
    }

    #[test]
    fn six_chains_next_die_directly_after() {
        let mut dice = ScriptedDice::new([6, 3, 2, 5, 4]);
        let rolled = roll_exploding(4, &mut dice);
        let faces: Vec<_> = rolled.iter().map(|d| d.face).collect();
        assert_eq!(faces, [6, 3, 2, 5, 4]);
        assert!(rolled[0].exploded);
        assert!(!rolled[1].exploded);
    }

    #[test]
    fn chained_sixes_keep_exploding() {
        let mut dice = ScriptedDice::new([6, 6, 6, 2, 1]);
        let rolled = roll_exploding(2, &mut dice);
        let faces: Vec<_> = rolled.iter().map(|d| d.face).collect();
        assert_eq!(faces, [6, 6, 6, 2, 1]);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn out_of_range_faces_are_clamped() {
        let mut dice = ScriptedDice::new([0, 9, 3]);
        let rolled = roll_exploding(2, &mut dice);
        let faces: Vec<_> = rolled.iter().map(|d| d.face).collect();
        assert_eq!(faces, [1, 6, 3]);
    }

    #[test]
    fn endless_sixes_are_cut_off() {
        struct AlwaysSix;
        impl DieSource for AlwaysSix {
            fn roll_face(&mut self) -> u32 {
                6
            }
        }
        let rolled = roll_exploding(1, &mut AlwaysSix);
        assert_eq!(rolled.len(), MAX_CHAIN + 1);
        let last = rolled.last().unwrap();
        assert_eq!(last.face, 6);
        assert!(!last.exploded);
        assert!(rolled[..MAX_CHAIN].iter().all(|d| d.exploded));
    }

    proptest! {
        #[test]
        fn length_is_pool_plus_sixes(pool in 1u32..40, seed in any::<u64>()) {
            let mut dice = RandomDice::seeded(seed);
            let rolled = roll_exploding(pool, &mut dice);
            let sixes = rolled.iter().filter(|d| d.exploded).count();
            prop_assert!(rolled.len() >= pool as usize);
            prop_assert_eq!(rolled.len(), pool as usize + sixes);
            prop_assert!(!rolled.last().unwrap().exploded);
        }
    }
}
