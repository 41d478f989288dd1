//! Folding exploded dice into run totals.

use crate::dice::DieOutcome;

/// Reduce rolled dice to run totals.
///
/// A run is a chain of exploded dice plus the die that ends it, summed. Run
/// boundaries follow the `exploded` flags, not the faces. A chain still open
/// at the end of the input (a truncated roll) becomes a final run, and an
/// empty roll yields a single run of 0 so there is always a highest run.
pub fn reduce_runs(dice: &[DieOutcome]) -> Vec<u32> {
    let mut runs = Vec::new();
    let mut running: u32 = 0;

    for die in dice {
        running = running.saturating_add(die.face);
        if !die.exploded {
            runs.push(running);
            running = 0;
        }
    }

    if running > 0 {
        runs.push(running);
    }
    if runs.is_empty() {
        runs.push(0);
    }
    runs
}
