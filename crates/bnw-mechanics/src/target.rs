//! Target number resolution.
//!
//! A roll either names its target up front or asks the operator for one.
//! Asking goes through an ordered list of [`TargetPrompt`] surfaces: when a
//! surface is missing or breaks, the next one is tried. Whatever the operator
//! types is normalized, so a broken answer never reaches the dice.

use tracing::{debug, warn};

use crate::config::SystemConfig;

/// What the operator did with a target prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PromptReply {
    /// The operator confirmed a value. It may still be NaN or infinite if the
    /// surface could not parse the input.
    Number(f64),
    /// The operator dismissed the prompt.
    Cancelled,
}

/// Why a prompt surface could not ask.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// The surface does not exist in this host.
    #[error("prompt surface unavailable")]
    Unavailable,
    /// The surface failed while asking.
    #[error("prompt failed: {0}")]
    Failed(String),
}

/// A way to ask the operator for a number.
pub trait TargetPrompt {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// Show a numeric field pre-filled with `default` and wait for the answer.
    /// `context` names what is being rolled, e.g. `"Brawl / Strength"`.
    fn request_number(&mut self, default: u32, context: &str) -> Result<PromptReply, PromptError>;
}

/// Resolves the target number for a roll.
pub struct TargetResolver<'a> {
    surfaces: Vec<Box<dyn TargetPrompt + 'a>>,
    default_target: u32,
    min_target: u32,
}

impl<'a> TargetResolver<'a> {
    /// A resolver with no prompt surfaces, using the configured defaults.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            surfaces: Vec::new(),
            default_target: config.default_target,
            min_target: config.min_target,
        }
    }

    /// Add a prompt surface. Surfaces are tried in the order they are added.
    pub fn with_surface(mut self, surface: impl TargetPrompt + 'a) -> Self {
        self.surfaces.push(Box::new(surface));
        self
    }

    /// Number of prompt surfaces.
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Resolve a target number.
    ///
    /// An explicit target is used as given (raised to the minimum). Otherwise
    /// the operator is asked with the configured default pre-filled. Returns
    /// `None` when the operator cancels or no surface could ask.
    pub fn resolve(&mut self, explicit: Option<i64>, context: &str) -> Option<u32> {
        if let Some(target) = explicit {
            return Some(self.clamp(target));
        }
        let offered = self.default_target;

        for surface in &mut self.surfaces {
            match surface.request_number(offered, context) {
                Ok(PromptReply::Number(n)) => {
                    let target = normalize(n, offered, self.min_target);
                    debug!(surface = surface.name(), raw = n, target, "target resolved");
                    return Some(target);
                }
                Ok(PromptReply::Cancelled) => {
                    debug!(surface = surface.name(), "target prompt cancelled");
                    return None;
                }
                Err(e) => {
                    warn!(surface = surface.name(), error = %e, "target prompt failed, trying next surface");
                }
            }
        }

        warn!("no target prompt surface available, cancelling roll");
        None
    }

    fn clamp(&self, target: i64) -> u32 {
        u32::try_from(target.max(i64::from(self.min_target))).unwrap_or(u32::MAX)
    }
}

/// Turn a typed answer into a target number.
///
/// Non-finite answers fall back to `default`. Fractions round up, which keeps
/// `highest >= target` equivalent for integer run totals.
fn normalize(raw: f64, default: u32, min: u32) -> u32 {
    if !raw.is_finite() {
        return default.max(min);
    }
    let ceiled = raw.ceil();
    if ceiled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        ceiled.max(f64::from(min)) as u32
    }
}
