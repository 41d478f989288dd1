use std::collections::BTreeMap;

use crate::error::CoreResult;
use crate::record::{ActorRecord, ItemRecord, RecordId, TraitMap};

/// A partial update to an actor's ruleset data.
///
/// Only the fields that are set are written; everything else on the record
/// is left as it was.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActorPatch {
    /// Replacement trait map, if the traits changed.
    pub traits: Option<TraitMap>,
    /// New trait association per skill key, for skills whose association changed.
    pub skill_traits: BTreeMap<String, String>,
}

impl ActorPatch {
    /// Returns true if applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.traits.is_none() && self.skill_traits.is_empty()
    }

    /// Apply the patch to an actor in place.
    pub fn apply(&self, actor: &mut ActorRecord) {
        if let Some(traits) = &self.traits {
            actor.system.traits = traits.clone();
        }
        for (skill, trait_key) in &self.skill_traits {
            if let Some(entry) = actor.system.skills.get_mut(skill) {
                entry.trait_key = Some(trait_key.clone());
            }
        }
    }
}

/// A partial update to an item's ruleset data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemPatch {
    /// New trait key, if it changed.
    pub trait_key: Option<String>,
}

impl ItemPatch {
    /// Returns true if applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.trait_key.is_none()
    }

    /// Apply the patch to an item in place.
    pub fn apply(&self, item: &mut ItemRecord) {
        if let Some(trait_key) = &self.trait_key {
            item.system.trait_key = trait_key.clone();
        }
    }
}

/// Where an item record lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemLocation {
    /// A world-level item not owned by any actor.
    World(RecordId),
    /// An item embedded in an actor.
    Owned {
        /// The owning actor.
        actor: RecordId,
        /// The item itself.
        item: RecordId,
    },
}

/// Read and partial-update access to persisted actor and item records.
pub trait RecordStore {
    /// IDs of every actor, in storage order.
    fn actor_ids(&self) -> Vec<RecordId>;

    /// Look up an actor.
    fn actor(&self, id: RecordId) -> Option<&ActorRecord>;

    /// IDs of every world-level item, in storage order.
    fn world_item_ids(&self) -> Vec<RecordId>;

    /// Look up a world-level item.
    fn world_item(&self, id: RecordId) -> Option<&ItemRecord>;

    /// Persist a partial update to an actor.
    fn update_actor(&mut self, id: RecordId, patch: &ActorPatch) -> CoreResult<()>;

    /// Persist a partial update to an item.
    fn update_item(&mut self, location: ItemLocation, patch: &ItemPatch) -> CoreResult<()>;
}

/// Persisted world-scoped boolean flags.
pub trait SettingsStore {
    /// Read a flag. An unset flag reads as `false`.
    fn get_flag(&self, namespace: &str, key: &str) -> CoreResult<bool>;

    /// Write a flag.
    fn set_flag(&mut self, namespace: &str, key: &str, value: bool) -> CoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{PowerData, SkillEntry, TraitEntry};

    #[test]
    fn empty_patches() {
        assert!(ActorPatch::default().is_empty());
        assert!(ItemPatch::default().is_empty());
    }

    #[test]
    fn actor_patch_rewrites_only_named_skills() {
        let mut actor = ActorRecord::new("Nova");
        actor
            .system
            .skills
            .insert("brawl".into(), SkillEntry::new("Brawl", "body", 2));
        actor
            .system
            .skills
            .insert("lore".into(), SkillEntry::new("Lore", "mind", 1));

        let patch = ActorPatch {
            traits: Some(TraitMap::from([(
                "strength".to_string(),
                TraitEntry::new("Strength", 3),
            )])),
            skill_traits: BTreeMap::from([
                ("brawl".to_string(), "strength".to_string()),
                ("missing".to_string(), "speed".to_string()),
            ]),
        };
        patch.apply(&mut actor);

        assert_eq!(actor.system.traits.len(), 1);
        assert_eq!(
            actor.system.skills["brawl"].trait_key.as_deref(),
            Some("strength")
        );
        assert_eq!(actor.system.skills["lore"].trait_key.as_deref(), Some("mind"));
        assert!(!actor.system.skills.contains_key("missing"));
    }

    #[test]
    fn item_patch_sets_trait() {
        let mut item = ItemRecord::power(
            "Flight",
            PowerData {
                trait_key: "body".into(),
                ..PowerData::default()
            },
        );
        ItemPatch {
            trait_key: Some("speed".into()),
        }
        .apply(&mut item);
        assert_eq!(item.system.trait_key, "speed");
    }
}
