//! Choice lists for the power item sheet.
//!
//! A power picks a trait and a skill from dropdowns. The options merge the
//! configured defaults with whatever the owning actor has, and always include
//! the power's current choice so an unusual value is never silently dropped.

use bnw_core::{ActorRecord, SkillMap};
use serde::Serialize;

use crate::config::{SystemConfig, label_or_key};

/// One dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Stored value.
    pub key: String,
    /// Displayed text.
    pub label: String,
}

/// Insertion-ordered options where a later insert relabels an earlier key
/// without moving it.
#[derive(Default)]
struct Options(Vec<SelectOption>);

impl Options {
    fn set(&mut self, key: &str, label: String) {
        match self.0.iter_mut().find(|o| o.key == key) {
            Some(existing) => existing.label = label,
            None => self.0.push(SelectOption {
                key: key.to_string(),
                label,
            }),
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|o| o.key == key)
    }
}

/// Trait choices: configured traits, then the owner's traits (their labels
/// win), then the current value if it is none of those.
pub fn trait_options(
    owner: Option<&ActorRecord>,
    config: &SystemConfig,
    current: &str,
) -> Vec<SelectOption> {
    let mut options = Options::default();
    for key in &config.traits {
        options.set(key, label_or_key("", key));
    }
    if let Some(actor) = owner {
        for (key, entry) in &actor.system.traits {
            options.set(key, label_or_key(&entry.label, key));
        }
    }
    if !current.is_empty() && !options.contains(current) {
        options.set(current, label_or_key("", current));
    }
    options.0
}

/// Skill choices labelled `"Skill (Trait)"` and sorted by label: default
/// skills, then the owner's skills, then the current value if missing.
pub fn skill_options(
    owner: Option<&ActorRecord>,
    config: &SystemConfig,
    current: &str,
    traits: &[SelectOption],
) -> Vec<SelectOption> {
    let default_trait = traits
        .first()
        .map(|t| t.key.as_str())
        .or_else(|| config.traits.first().map(String::as_str))
        .unwrap_or_default();
    let trait_label = |key: &str| {
        traits
            .iter()
            .find(|t| t.key == key)
            .map_or_else(|| label_or_key("", key), |t| t.label.clone())
    };
    let describe = |key: &str, label: &str, trait_key: Option<&str>| {
        let base = label_or_key(label, key);
        let trait_key = trait_key.unwrap_or(default_trait);
        if trait_key.is_empty() {
            base
        } else {
            format!("{base} ({})", trait_label(trait_key))
        }
    };

    let mut options = Options::default();
    let mut merge = |skills: &SkillMap| {
        for (key, skill) in skills {
            options.set(key, describe(key, &skill.label, skill.trait_key.as_deref()));
        }
    };
    merge(&config.default_skills);
    if let Some(actor) = owner {
        merge(&actor.system.skills);
    }

    if !current.is_empty() && !options.contains(current) {
        let owned = owner.and_then(|a| a.system.skills.get(current));
        let label = owned.map_or("", |s| s.label.as_str());
        let trait_key = owned.and_then(|s| s.trait_key.as_deref());
        options.set(current, describe(current, label, trait_key));
    }

    let mut options = options.0;
    options.sort_by(|a, b| a.label.cmp(&b.label));
    options
}
