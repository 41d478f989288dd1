//! System configuration: trait keys, default skills, targets, migration table.
//!
//! A [`SystemConfig`] is built once and passed by reference to everything
//! that needs it. [`SystemConfig::default`] is the stock Brave New World
//! setup; a JSON file can override any subset of its fields.

use std::path::Path;

use bnw_core::{ActorRecord, SkillEntry, SkillMap, TraitMap};
use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};
use crate::migrate::MigrationTable;

/// Trait key for physical power.
pub const STRENGTH: &str = "strength";
/// Trait key for agility and reflexes.
pub const SPEED: &str = "speed";
/// Trait key for intellect.
pub const SMARTS: &str = "smarts";
/// Trait key for willpower and presence.
pub const SPIRIT: &str = "spirit";

/// Immutable ruleset configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Trait keys in display order. The first one is the fallback trait for
    /// skills that have no association.
    pub traits: Vec<String>,
    /// Target number offered when none is given (default: 7).
    pub default_target: u32,
    /// Lowest target number accepted (default: 2).
    pub min_target: u32,
    /// Most dice a single roll may throw (default: 100). Larger pools are
    /// refused rather than rolled.
    pub max_pool: u32,
    /// Skills seeded into a sheet whose skill map is empty.
    pub default_skills: SkillMap,
    /// Rules for moving records off the legacy trait taxonomy.
    pub migration: MigrationTable,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            traits: [STRENGTH, SPEED, SMARTS, SPIRIT]
                .map(String::from)
                .to_vec(),
            default_target: 7,
            min_target: 2,
            max_pool: 100,
            default_skills: default_skills(),
            migration: MigrationTable::default(),
        }
    }
}

impl SystemConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> MechResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| MechError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> MechResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| MechError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> MechResult<()> {
        if self.traits.is_empty() {
            return Err(MechError::InvalidConfig(
                "at least one trait is required".to_string(),
            ));
        }
        if self.min_target < 2 {
            return Err(MechError::InvalidConfig(format!(
                "min_target must be at least 2, got {}",
                self.min_target
            )));
        }
        if self.max_pool == 0 {
            return Err(MechError::InvalidConfig(
                "max_pool must be at least 1".to_string(),
            ));
        }
        if self.default_target < self.min_target {
            return Err(MechError::InvalidConfig(format!(
                "default_target {} is below min_target {}",
                self.default_target, self.min_target
            )));
        }
        Ok(())
    }

    /// The trait a skill without an association rolls with on this actor:
    /// the first configured trait the actor has, else the actor's first trait
    /// key, else the first configured trait.
    pub fn default_trait_for<'a>(&'a self, traits: &'a TraitMap) -> &'a str {
        self.traits
            .iter()
            .find(|k| traits.contains_key(k.as_str()))
            .or_else(|| traits.keys().next())
            .or_else(|| self.traits.first())
            .map(String::as_str)
            .unwrap_or(STRENGTH)
    }

    /// The actor's skills, or the default skill table if the actor has none.
    pub fn skills_of<'a>(&'a self, actor: &'a ActorRecord) -> &'a SkillMap {
        if actor.system.skills.is_empty() {
            &self.default_skills
        } else {
            &actor.system.skills
        }
    }
}

/// Uppercase the first character of a key for use as a fallback label.
pub fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A label if it is not blank, else the capitalized key.
pub fn label_or_key(label: &str, key: &str) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        capitalize(key)
    } else {
        trimmed.to_string()
    }
}

fn default_skills() -> SkillMap {
    [
        ("athletics", "Athletics", STRENGTH),
        ("brawl", "Brawl", STRENGTH),
        ("might", "Might", STRENGTH),
        ("acrobatics", "Acrobatics", SPEED),
        ("driving", "Driving", SPEED),
        ("marksmanship", "Marksmanship", SPEED),
        ("stealth", "Stealth", SPEED),
        ("investigation", "Investigation", SMARTS),
        ("medicine", "Medicine", SMARTS),
        ("science", "Science", SMARTS),
        ("technology", "Technology", SMARTS),
        ("empathy", "Empathy", SPIRIT),
        ("intimidation", "Intimidation", SPIRIT),
        ("persuasion", "Persuasion", SPIRIT),
        ("willpower", "Willpower", SPIRIT),
    ]
    .into_iter()
    .map(|(key, label, trait_key)| (key.to_string(), SkillEntry::new(label, trait_key, 0)))
    .collect()
}
