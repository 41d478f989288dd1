use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Unique identifier for every actor and item record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Generate a new random record ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The type of an actor record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    /// A player character ("delta") with traits, skills, and powers.
    #[default]
    Delta,
    /// An actor type this ruleset does not manage.
    Custom(String),
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delta => write!(f, "delta"),
            Self::Custom(s) => write!(f, "{s}"),
        }
    }
}

/// The type of an item record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A power: a trait + skill roll with bonus dice.
    #[default]
    Power,
    /// An item type this ruleset does not manage.
    Custom(String),
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Power => write!(f, "power"),
            Self::Custom(s) => write!(f, "{s}"),
        }
    }
}

/// A trait score on a character sheet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TraitEntry {
    /// Display label. May be blank on older records.
    #[serde(default)]
    pub label: String,
    /// Trait rating.
    #[serde(default, deserialize_with = "lenient_int")]
    pub value: i64,
}

impl TraitEntry {
    /// Create a trait entry.
    pub fn new(label: impl Into<String>, value: i64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A skill score and the trait it rolls with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkillEntry {
    /// Display label. May be blank on older records.
    #[serde(default)]
    pub label: String,
    /// The associated trait key, if one has been assigned.
    #[serde(rename = "trait", default, skip_serializing_if = "Option::is_none")]
    pub trait_key: Option<String>,
    /// Skill rating.
    #[serde(default, deserialize_with = "lenient_int")]
    pub value: i64,
}

impl SkillEntry {
    /// Create a skill entry tied to a trait.
    pub fn new(label: impl Into<String>, trait_key: impl Into<String>, value: i64) -> Self {
        Self {
            label: label.into(),
            trait_key: Some(trait_key.into()),
            value,
        }
    }
}

/// Trait key to trait entry.
pub type TraitMap = BTreeMap<String, TraitEntry>;

/// Skill key to skill entry.
pub type SkillMap = BTreeMap<String, SkillEntry>;

/// Free-text biographical fields on a character.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Details {
    /// The player controlling the character.
    pub player_name: String,
    /// Civilian name.
    pub hero_name: String,
    /// Code name.
    pub code_name: String,
    /// Where the character's powers came from.
    pub origin: String,
    /// Team or faction.
    pub affiliation: String,
    /// Background notes.
    pub background: String,
}

/// The ruleset-specific data of an actor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorSystem {
    /// Biographical fields.
    pub details: Details,
    /// Trait scores keyed by trait key.
    pub traits: TraitMap,
    /// Skill scores keyed by skill key.
    pub skills: SkillMap,
    /// Free-form notes.
    pub notes: String,
}

/// The ruleset-specific data of a power item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerData {
    /// The trait the power rolls with.
    #[serde(rename = "trait")]
    pub trait_key: String,
    /// The skill the power rolls with. Blank for a trait-only roll.
    pub skill: String,
    /// Bonus dice the power adds to the pool.
    #[serde(deserialize_with = "lenient_int")]
    pub dice: i64,
    /// Rules text.
    pub description: String,
}

/// An item document, either owned by an actor or at world level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Unique identifier.
    #[serde(default)]
    pub id: RecordId,
    /// Item type.
    #[serde(default)]
    pub kind: ItemKind,
    /// Display name.
    pub name: String,
    /// Ruleset data.
    #[serde(default)]
    pub system: PowerData,
}

impl ItemRecord {
    /// Create a power item.
    pub fn power(name: impl Into<String>, system: PowerData) -> Self {
        Self {
            id: RecordId::new(),
            kind: ItemKind::Power,
            name: name.into(),
            system,
        }
    }
}

/// A character document with its embedded items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorRecord {
    /// Unique identifier.
    #[serde(default)]
    pub id: RecordId,
    /// Actor type.
    #[serde(default)]
    pub kind: ActorKind,
    /// Display name.
    pub name: String,
    /// Ruleset data.
    #[serde(default)]
    pub system: ActorSystem,
    /// Items owned by this actor.
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

impl ActorRecord {
    /// Create a delta actor with empty ruleset data.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            kind: ActorKind::Delta,
            name: name.into(),
            system: ActorSystem::default(),
            items: Vec::new(),
        }
    }

    /// Look up an owned item by ID.
    pub fn item(&self, id: RecordId) -> Option<&ItemRecord> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Look up an owned item by name (case-insensitive).
    pub fn find_item_by_name(&self, name: &str) -> Option<&ItemRecord> {
        let lower = name.to_lowercase();
        self.items.iter().find(|i| i.name.to_lowercase() == lower)
    }

    /// Owned items of the power type.
    pub fn powers(&self) -> impl Iterator<Item = &ItemRecord> {
        self.items.iter().filter(|i| i.kind == ItemKind::Power)
    }
}

/// Read an integer from whatever the host stored: numbers, numeric strings,
/// or nothing at all. Anything that is not a finite number reads as 0.
fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0),
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f as i64)
                })
                .unwrap_or(0)
        }
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_display_shows_short_form() {
        let id = RecordId(Uuid::parse_str("a3f2b1c8-1234-5678-9abc-def012345678").unwrap());
        assert_eq!(id.to_string(), "a3f2b1c8");
    }

    #[test]
    fn trait_value_accepts_numeric_strings_and_floats() {
        let t: TraitEntry = serde_json::from_str(r#"{"label":"Body","value":"3"}"#).unwrap();
        assert_eq!(t.value, 3);
        let t: TraitEntry = serde_json::from_str(r#"{"value":2.9}"#).unwrap();
        assert_eq!(t.value, 2);
        assert!(t.label.is_empty());
    }

    #[test]
    fn missing_or_garbage_values_read_as_zero() {
        let t: TraitEntry = serde_json::from_str(r#"{"label":"Mind"}"#).unwrap();
        assert_eq!(t.value, 0);
        let t: TraitEntry = serde_json::from_str(r#"{"value":null}"#).unwrap();
        assert_eq!(t.value, 0);
        let t: TraitEntry = serde_json::from_str(r#"{"value":"lots"}"#).unwrap();
        assert_eq!(t.value, 0);
    }

    #[test]
    fn skill_trait_uses_host_field_name() {
        let s: SkillEntry =
            serde_json::from_str(r#"{"label":"Brawl","trait":"body","value":1}"#).unwrap();
        assert_eq!(s.trait_key.as_deref(), Some("body"));

        let json = serde_json::to_value(SkillEntry {
            label: "Lore".into(),
            trait_key: None,
            value: 0,
        })
        .unwrap();
        assert!(json.get("trait").is_none());
    }

    #[test]
    fn actor_without_system_data_deserializes() {
        let a: ActorRecord = serde_json::from_str(r#"{"name":"Nova"}"#).unwrap();
        assert_eq!(a.kind, ActorKind::Delta);
        assert!(a.system.traits.is_empty());
        assert!(a.items.is_empty());
    }

    #[test]
    fn powers_filters_item_kind() {
        let mut actor = ActorRecord::new("Nova");
        actor
            .items
            .push(ItemRecord::power("Flight", PowerData::default()));
        actor.items.push(ItemRecord {
            id: RecordId::new(),
            kind: ItemKind::Custom("gear".into()),
            name: "Rope".into(),
            system: PowerData::default(),
        });
        let names: Vec<_> = actor.powers().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Flight"]);
        assert!(actor.find_item_by_name("ROPE").is_some());
    }
}
