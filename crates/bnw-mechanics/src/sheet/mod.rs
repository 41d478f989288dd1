//! Character sheet view-models.
//!
//! An [`ActorSheet`] is what a sheet renderer needs to draw an actor: traits
//! in display order, skills grouped under the trait they roll with (each with
//! its pool), and the actor's powers. Building one never mutates the record.

pub mod item;

pub use item::{SelectOption, skill_options, trait_options};

use bnw_core::{ActorRecord, Details, RecordId, TraitMap};
use serde::Serialize;

use crate::config::{SystemConfig, label_or_key};
use crate::pool::pool_size;

/// A trait as shown on the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraitView {
    /// Trait key.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Rating.
    pub value: i64,
}

/// A skill as shown on the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillView {
    /// Skill key.
    pub key: String,
    /// Display label.
    pub label: String,
    /// The trait it rolls with.
    pub trait_key: String,
    /// Rating.
    pub value: i64,
    /// Dice rolled for trait + skill.
    pub pool: u32,
}

/// The skills that roll with one trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillGroup {
    /// Trait key.
    pub trait_key: String,
    /// Trait label.
    pub trait_label: String,
    /// Skills, sorted by label.
    pub skills: Vec<SkillView>,
}

/// A power as listed on the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PowerView {
    /// Item ID.
    pub id: RecordId,
    /// Power name.
    pub name: String,
    /// Trait rolled.
    pub trait_key: String,
    /// Skill rolled.
    pub skill: String,
    /// Bonus dice.
    pub dice: i64,
}

/// Everything needed to render an actor sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorSheet {
    /// Actor name.
    pub name: String,
    /// Biographical fields.
    pub details: Details,
    /// Traits: configured ones first in config order, then any others.
    pub traits: Vec<TraitView>,
    /// Skills grouped by trait, in trait order.
    pub skill_groups: Vec<SkillGroup>,
    /// Owned powers.
    pub powers: Vec<PowerView>,
    /// Free-form notes.
    pub notes: String,
}

impl ActorSheet {
    /// Build the view-model for an actor.
    pub fn prepare(actor: &ActorRecord, config: &SystemConfig) -> Self {
        let traits = trait_views(&actor.system.traits, config);
        let default_trait = traits
            .first()
            .map(|t| t.key.clone())
            .unwrap_or_else(|| config.default_trait_for(&actor.system.traits).to_string());

        let mut groups: Vec<SkillGroup> = traits
            .iter()
            .map(|t| SkillGroup {
                trait_key: t.key.clone(),
                trait_label: t.label.clone(),
                skills: Vec::new(),
            })
            .collect();

        for (key, skill) in config.skills_of(actor) {
            let trait_key = skill
                .trait_key
                .clone()
                .unwrap_or_else(|| default_trait.clone());
            let trait_value = traits
                .iter()
                .find(|t| t.key == trait_key)
                .map_or(0, |t| t.value);
            let view = SkillView {
                key: key.clone(),
                label: label_or_key(&skill.label, key),
                value: skill.value,
                pool: pool_size(trait_value, skill.value, 0),
                trait_key: trait_key.clone(),
            };
            match groups.iter_mut().find(|g| g.trait_key == trait_key) {
                Some(group) => group.skills.push(view),
                None => groups.push(SkillGroup {
                    trait_label: label_or_key("", &trait_key),
                    trait_key,
                    skills: vec![view],
                }),
            }
        }

        for group in &mut groups {
            group.skills.sort_by(|a, b| a.label.cmp(&b.label));
        }

        let powers = actor
            .powers()
            .map(|p| PowerView {
                id: p.id,
                name: p.name.clone(),
                trait_key: p.system.trait_key.clone(),
                skill: p.system.skill.clone(),
                dice: p.system.dice,
            })
            .collect();

        Self {
            name: actor.name.clone(),
            details: actor.system.details.clone(),
            traits,
            skill_groups: groups,
            powers,
            notes: actor.system.notes.clone(),
        }
    }

    /// Look up a trait row.
    pub fn trait_view(&self, key: &str) -> Option<&TraitView> {
        self.traits.iter().find(|t| t.key == key)
    }

    /// Look up a skill row in any group.
    pub fn skill_view(&self, key: &str) -> Option<&SkillView> {
        self.skill_groups
            .iter()
            .flat_map(|g| g.skills.iter())
            .find(|s| s.key == key)
    }
}

/// Configured traits (filled in at 0 when missing), then the actor's others.
fn trait_views(traits: &TraitMap, config: &SystemConfig) -> Vec<TraitView> {
    let mut views: Vec<TraitView> = config
        .traits
        .iter()
        .map(|key| match traits.get(key) {
            Some(entry) => TraitView {
                key: key.clone(),
                label: label_or_key(&entry.label, key),
                value: entry.value,
            },
            None => TraitView {
                key: key.clone(),
                label: label_or_key("", key),
                value: 0,
            },
        })
        .collect();

    views.extend(
        traits
            .iter()
            .filter(|(key, _)| !config.traits.contains(key))
            .map(|(key, entry)| TraitView {
                key: key.clone(),
                label: label_or_key(&entry.label, key),
                value: entry.value,
            }),
    );
    views
}
