//! Migration from the legacy `body`/`mind` trait taxonomy.
//!
//! Old characters carried `body`, `mind`, and `spirit`. The current ruleset
//! splits `body` into `strength` and `speed` and renames `mind` to `smarts`.
//! This module holds the pure record transforms; [`runner`] applies them to a
//! store once per installation under a persisted completion flag.
//!
//! Every transform returns a patch that is empty when the record is already
//! current, so running the migration twice writes nothing the second time.

pub mod runner;

pub use runner::{
    MigrationReport, MigrationState, Operator, ReadyOutcome, RecordFailure, migrate_records,
    migration_state, run_ready_migration,
};

use std::collections::BTreeMap;

use bnw_core::{ActorPatch, ActorSystem, ItemPatch, PowerData, TraitEntry, TraitMap};
use serde::{Deserialize, Serialize};

use crate::config::{SMARTS, SPEED, SPIRIT, STRENGTH, capitalize};

/// Legacy physical trait, split into strength and speed.
pub const LEGACY_BODY: &str = "body";
/// Legacy mental trait, renamed to smarts.
pub const LEGACY_MIND: &str = "mind";

/// Rules for remapping legacy trait associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationTable {
    /// Settings namespace of the completion flag.
    pub namespace: String,
    /// Settings key of the completion flag.
    pub flag_key: String,
    /// Where each skill formerly tied to `body` goes.
    pub body_skills: BTreeMap<String, String>,
    /// Where a `body` skill missing from `body_skills` goes.
    pub body_fallback: String,
}

impl Default for MigrationTable {
    fn default() -> Self {
        let strength = ["athletics", "brawl", "endurance", "melee", "might"]
            .map(|s| (s.to_string(), STRENGTH.to_string()));
        let speed = [
            "acrobatics",
            "dodge",
            "driving",
            "marksmanship",
            "piloting",
            "sleight_of_hand",
            "stealth",
        ]
        .map(|s| (s.to_string(), SPEED.to_string()));

        Self {
            namespace: "bravenewworld".to_string(),
            flag_key: "traitMigrationComplete".to_string(),
            body_skills: strength.into_iter().chain(speed).collect(),
            body_fallback: STRENGTH.to_string(),
        }
    }
}

impl MigrationTable {
    /// The current trait a legacy association should become, or `None` if the
    /// association is not a legacy key. `skill` picks the side of the `body`
    /// split.
    pub fn remap(&self, legacy_trait: &str, skill: Option<&str>) -> Option<&str> {
        match legacy_trait {
            LEGACY_BODY => Some(
                skill
                    .and_then(|s| self.body_skills.get(s))
                    .unwrap_or(&self.body_fallback)
                    .as_str(),
            ),
            LEGACY_MIND => Some(SMARTS),
            _ => None,
        }
    }
}

/// Returns true if a trait key belongs to the legacy taxonomy.
pub fn is_legacy_trait(key: &str) -> bool {
    key == LEGACY_BODY || key == LEGACY_MIND
}

/// Returns true if nothing on this actor still refers to a legacy trait.
pub fn is_migrated(system: &ActorSystem) -> bool {
    !system.traits.keys().any(|k| is_legacy_trait(k))
        && !system
            .skills
            .values()
            .any(|s| s.trait_key.as_deref().is_some_and(is_legacy_trait))
}

/// The trait map with legacy keys replaced, or `None` if there are none.
///
/// `strength` and `speed` both take the old `body` value, `smarts` takes the
/// old `mind` value, and `spirit` is kept or created at 0. Existing non-blank
/// labels on the new keys survive; blank ones become the capitalized key.
pub fn migrate_traits(traits: &TraitMap) -> Option<TraitMap> {
    if !traits.keys().any(|k| is_legacy_trait(k)) {
        return None;
    }

    let mut next = traits.clone();
    let body = next.remove(LEGACY_BODY);
    let mind = next.remove(LEGACY_MIND);

    for key in [STRENGTH, SPEED] {
        seed(&mut next, key, body.as_ref());
    }
    seed(&mut next, SMARTS, mind.as_ref());
    seed(&mut next, SPIRIT, None);

    (next != *traits).then_some(next)
}

/// Set `key` from a legacy entry's value, keeping a non-blank label. Without
/// a legacy entry an existing value is kept, or the key is created at 0.
fn seed(traits: &mut TraitMap, key: &str, from: Option<&TraitEntry>) {
    let entry = traits
        .entry(key.to_string())
        .or_insert_with(|| TraitEntry::new("", 0));
    if entry.label.trim().is_empty() {
        entry.label = capitalize(key);
    }
    if let Some(old) = from {
        entry.value = old.value;
    }
}

/// The patch that moves an actor onto the current taxonomy. Empty when the
/// actor is already current.
pub fn migrate_actor(system: &ActorSystem, table: &MigrationTable) -> ActorPatch {
    let skill_traits = system
        .skills
        .iter()
        .filter_map(|(key, skill)| {
            let current = skill.trait_key.as_deref()?;
            let next = table.remap(current, Some(key))?;
            (next != current).then(|| (key.clone(), next.to_string()))
        })
        .collect();

    ActorPatch {
        traits: migrate_traits(&system.traits),
        skill_traits,
    }
}

/// The migrated form of an actor's data: [`migrate_actor`] applied to a copy.
pub fn migrated(system: &ActorSystem, table: &MigrationTable) -> ActorSystem {
    let patch = migrate_actor(system, table);
    let mut next = system.clone();
    if let Some(traits) = patch.traits {
        next.traits = traits;
    }
    for (key, trait_key) in patch.skill_traits {
        if let Some(skill) = next.skills.get_mut(&key) {
            skill.trait_key = Some(trait_key);
        }
    }
    next
}

/// The patch that moves a power's trait onto the current taxonomy. The
/// power's skill decides which side of the `body` split it lands on.
pub fn migrate_item(power: &PowerData, table: &MigrationTable) -> ItemPatch {
    let skill = Some(power.skill.as_str()).filter(|s| !s.is_empty());
    ItemPatch {
        trait_key: table
            .remap(&power.trait_key, skill)
            .filter(|next| *next != power.trait_key)
            .map(String::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bnw_core::SkillEntry;
    use proptest::prelude::*;

    fn legacy() -> ActorSystem {
        let mut system = ActorSystem::default();
        system
            .traits
            .insert("body".into(), TraitEntry::new("Body", 3));
        system
            .traits
            .insert("mind".into(), TraitEntry::new("Mind", 2));
        system
            .traits
            .insert("spirit".into(), TraitEntry::new("Spirit", 1));
        system
            .skills
            .insert("brawl".into(), SkillEntry::new("Brawl", "body", 2));
        system
            .skills
            .insert("stealth".into(), SkillEntry::new("Stealth", "body", 1));
        system
            .skills
            .insert("science".into(), SkillEntry::new("Science", "mind", 1));
        system
            .skills
            .insert("willpower".into(), SkillEntry::new("Willpower", "spirit", 1));
        system
    }

    #[test]
    fn splits_body_and_renames_mind() {
        let next = migrated(&legacy(), &MigrationTable::default());
        let values: Vec<_> = next
            .traits
            .iter()
            .map(|(k, t)| (k.as_str(), t.value))
            .collect();
        assert_eq!(
            values,
            [("smarts", 2), ("speed", 3), ("spirit", 1), ("strength", 3)]
        );
        assert_eq!(next.traits["strength"].label, "Strength");
        assert_eq!(next.traits["speed"].label, "Speed");
        assert_eq!(next.traits["smarts"].label, "Smarts");
    }

    #[test]
    fn skills_fan_out() {
        let next = migrated(&legacy(), &MigrationTable::default());
        let trait_of = |k: &str| next.skills[k].trait_key.clone().unwrap();
        assert_eq!(trait_of("brawl"), "strength");
        assert_eq!(trait_of("stealth"), "speed");
        assert_eq!(trait_of("science"), "smarts");
        assert_eq!(trait_of("willpower"), "spirit");
    }

    #[test]
    fn unmapped_body_skill_falls_back_to_strength() {
        let table = MigrationTable::default();
        assert_eq!(table.remap("body", Some("juggling")), Some("strength"));
        assert_eq!(table.remap("body", None), Some("strength"));
        assert_eq!(table.remap("spirit", Some("brawl")), None);
    }

    #[test]
    fn patch_only_names_changed_skills() {
        let patch = migrate_actor(&legacy(), &MigrationTable::default());
        assert!(patch.traits.is_some());
        let keys: Vec<_> = patch.skill_traits.keys().map(String::as_str).collect();
        assert_eq!(keys, ["brawl", "science", "stealth"]);
    }

    #[test]
    fn missing_spirit_is_created_and_labels_kept() {
        let mut system = ActorSystem::default();
        system
            .traits
            .insert("body".into(), TraitEntry::new("", 4));
        system
            .traits
            .insert("strength".into(), TraitEntry::new("Might", 1));
        let next = migrate_traits(&system.traits).unwrap();
        assert_eq!(next["strength"], TraitEntry::new("Might", 4));
        assert_eq!(next["speed"], TraitEntry::new("Speed", 4));
        assert_eq!(next["smarts"], TraitEntry::new("Smarts", 0));
        assert_eq!(next["spirit"], TraitEntry::new("Spirit", 0));
    }

    #[test]
    fn current_actor_needs_nothing() {
        let next = migrated(&legacy(), &MigrationTable::default());
        assert!(is_migrated(&next));
        assert!(!is_migrated(&legacy()));
        assert!(migrate_actor(&next, &MigrationTable::default()).is_empty());
    }

    #[test]
    fn skill_without_association_is_left_alone() {
        let mut system = ActorSystem::default();
        system.skills.insert(
            "lore".into(),
            SkillEntry {
                label: "Lore".into(),
                trait_key: None,
                value: 1,
            },
        );
        assert!(migrate_actor(&system, &MigrationTable::default()).is_empty());
    }

    #[test]
    fn items_follow_their_skill() {
        let table = MigrationTable::default();
        let power = |t: &str, s: &str| PowerData {
            trait_key: t.into(),
            skill: s.into(),
            ..PowerData::default()
        };
        assert_eq!(
            migrate_item(&power("body", "stealth"), &table).trait_key.as_deref(),
            Some("speed")
        );
        assert_eq!(
            migrate_item(&power("body", ""), &table).trait_key.as_deref(),
            Some("strength")
        );
        assert_eq!(
            migrate_item(&power("mind", "science"), &table).trait_key.as_deref(),
            Some("smarts")
        );
        assert!(migrate_item(&power("speed", "stealth"), &table).is_empty());
    }

    fn trait_key() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("body".to_string()),
            Just("mind".to_string()),
            Just("spirit".to_string()),
            Just("strength".to_string()),
            Just("speed".to_string()),
        ]
    }

    proptest! {
        #[test]
        fn migration_is_idempotent(
            traits in proptest::collection::btree_map(trait_key(), 0i64..6, 0..5),
            skills in proptest::collection::btree_map(
                prop_oneof![Just("brawl"), Just("stealth"), Just("lore"), Just("odd")]
                    .prop_map(String::from),
                trait_key(),
                0..4,
            ),
        ) {
            let mut system = ActorSystem::default();
            for (k, v) in traits {
                system.traits.insert(k, TraitEntry::new("", v));
            }
            for (k, t) in skills {
                system.skills.insert(k.clone(), SkillEntry::new(k, t, 1));
            }
            let table = MigrationTable::default();
            let once = migrated(&system, &table);
            prop_assert!(is_migrated(&once));
            prop_assert!(migrate_actor(&once, &table).is_empty());
            prop_assert_eq!(migrated(&once, &table), once);
        }
    }
}
