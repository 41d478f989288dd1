//! Dice-pool size from trait, skill, and bonus dice.

/// Number of dice to roll for a test: `trait + skill + bonus`, never fewer
/// than one.
///
/// Record values are already normalized when read (missing or non-numeric
/// host data reads as 0), so every term here is a plain integer. Bonus dice
/// may be negative; the floor still guarantees a single die.
pub fn pool_size(trait_value: i64, skill_value: i64, bonus_dice: i64) -> u32 {
    let total = trait_value
        .saturating_add(skill_value)
        .saturating_add(bonus_dice)
        .max(1);
    u32::try_from(total).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sums_terms() {
        assert_eq!(pool_size(2, 2, 0), 4);
        assert_eq!(pool_size(3, 1, 2), 6);
    }

    #[test]
    fn floor_of_one() {
        assert_eq!(pool_size(0, 0, 0), 1);
        assert_eq!(pool_size(1, 0, -5), 1);
    }

    #[test]
    fn huge_values_saturate() {
        assert_eq!(pool_size(i64::MAX, i64::MAX, 0), u32::MAX);
        assert_eq!(pool_size(i64::MIN, 0, 0), 1);
    }

    proptest! {
        #[test]
        fn pool_is_max_of_sum_and_one(t in 0i64..50, s in 0i64..50, b in -100i64..100) {
            let pool = pool_size(t, s, b);
            prop_assert!(pool >= 1);
            prop_assert_eq!(i64::from(pool), (t + s + b).max(1));
        }
    }
}
