//! Core record types for Brave New World: characters, powers, and the campaign store.
//!
//! These are the host-owned documents the rules engine reads and, during the
//! legacy trait migration, patches. The crate knows nothing about dice; it
//! only models records and the store seams ([`RecordStore`], [`SettingsStore`])
//! the engine talks to.

/// The campaign container that owns actors, world items, and settings.
pub mod campaign;
/// Error types used throughout the crate.
pub mod error;
/// Actor and item records with their trait and skill maps.
pub mod record;
/// World-scoped persisted settings.
pub mod settings;
/// Store traits and the partial updates they accept.
pub mod store;

/// Re-export the campaign container.
pub use campaign::{Campaign, CampaignMeta};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export record types.
pub use record::{
    ActorKind, ActorRecord, ActorSystem, Details, ItemKind, ItemRecord, PowerData, RecordId,
    SkillEntry, SkillMap, TraitEntry, TraitMap,
};
/// Re-export settings.
pub use settings::WorldSettings;
/// Re-export store seams.
pub use store::{ActorPatch, ItemLocation, ItemPatch, RecordStore, SettingsStore};
