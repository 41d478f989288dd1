use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::record::{ActorRecord, ItemRecord, RecordId};
use crate::settings::WorldSettings;
use crate::store::{ActorPatch, ItemLocation, ItemPatch, RecordStore, SettingsStore};

/// Metadata about the campaign itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignMeta {
    /// Campaign name.
    pub name: String,
    /// Version of the file layout.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
}

fn default_schema_version() -> u32 {
    1
}

impl CampaignMeta {
    /// Create metadata for a new campaign.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema_version: default_schema_version(),
        }
    }
}

/// A campaign: every actor, world-level item, and world setting.
///
/// This is the host's document database in miniature. The rules engine only
/// sees it through [`RecordStore`] and [`SettingsStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    /// Campaign metadata.
    pub meta: CampaignMeta,
    /// Actors in storage order.
    #[serde(default)]
    actors: Vec<ActorRecord>,
    /// World-level items in storage order.
    #[serde(default)]
    items: Vec<ItemRecord>,
    /// World-scoped settings.
    #[serde(default)]
    pub settings: WorldSettings,
}

impl Campaign {
    /// Create an empty campaign.
    pub fn new(meta: CampaignMeta) -> Self {
        Self {
            meta,
            actors: Vec::new(),
            items: Vec::new(),
            settings: WorldSettings::new(),
        }
    }

    /// Load a campaign from a JSON file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write the campaign to a JSON file.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    // -----------------------------------------------------------------------
    // Actors
    // -----------------------------------------------------------------------

    /// Add an actor. Returns its ID.
    pub fn add_actor(&mut self, actor: ActorRecord) -> CoreResult<RecordId> {
        if self.find_actor_by_name(&actor.name).is_some() {
            return Err(CoreError::DuplicateName(actor.name));
        }
        let id = actor.id;
        self.actors.push(actor);
        Ok(id)
    }

    /// Find an actor by name (case-insensitive).
    pub fn find_actor_by_name(&self, name: &str) -> Option<&ActorRecord> {
        let lower = name.to_lowercase();
        self.actors.iter().find(|a| a.name.to_lowercase() == lower)
    }

    /// All actors.
    pub fn actors(&self) -> &[ActorRecord] {
        &self.actors
    }

    fn actor_mut(&mut self, id: RecordId) -> CoreResult<&mut ActorRecord> {
        self.actors
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(CoreError::ActorNotFound(id))
    }

    // -----------------------------------------------------------------------
    // World items
    // -----------------------------------------------------------------------

    /// Add a world-level item. Returns its ID.
    pub fn add_item(&mut self, item: ItemRecord) -> RecordId {
        let id = item.id;
        self.items.push(item);
        id
    }

    /// All world-level items.
    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }
}

impl RecordStore for Campaign {
    fn actor_ids(&self) -> Vec<RecordId> {
        self.actors.iter().map(|a| a.id).collect()
    }

    fn actor(&self, id: RecordId) -> Option<&ActorRecord> {
        self.actors.iter().find(|a| a.id == id)
    }

    fn world_item_ids(&self) -> Vec<RecordId> {
        self.items.iter().map(|i| i.id).collect()
    }

    fn world_item(&self, id: RecordId) -> Option<&ItemRecord> {
        self.items.iter().find(|i| i.id == id)
    }

    fn update_actor(&mut self, id: RecordId, patch: &ActorPatch) -> CoreResult<()> {
        patch.apply(self.actor_mut(id)?);
        Ok(())
    }

    fn update_item(&mut self, location: ItemLocation, patch: &ItemPatch) -> CoreResult<()> {
        let item = match location {
            ItemLocation::World(id) => self
                .items
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or(CoreError::ItemNotFound(id))?,
            ItemLocation::Owned { actor, item } => self
                .actor_mut(actor)?
                .items
                .iter_mut()
                .find(|i| i.id == item)
                .ok_or(CoreError::ItemNotFound(item))?,
        };
        patch.apply(item);
        Ok(())
    }
}

impl SettingsStore for Campaign {
    fn get_flag(&self, namespace: &str, key: &str) -> CoreResult<bool> {
        match self.settings.get(namespace, key) {
            None | Some(serde_json::Value::Null) => Ok(false),
            Some(serde_json::Value::Bool(b)) => Ok(*b),
            Some(_) => Err(CoreError::InvalidSetting {
                namespace: namespace.to_string(),
                key: key.to_string(),
            }),
        }
    }

    fn set_flag(&mut self, namespace: &str, key: &str, value: bool) -> CoreResult<()> {
        self.settings
            .set(namespace, key, serde_json::Value::Bool(value));
        Ok(())
    }
}
