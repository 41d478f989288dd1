//! Applies the trait migration to a store, once, under a completion flag.

use bnw_core::{
    ActorKind, CoreError, ItemKind, ItemLocation, RecordId, RecordStore, SettingsStore,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{MigrationTable, migrate_actor, migrate_item};

/// The operator whose session reached the ready point.
pub trait Operator {
    /// Whether this operator may rewrite world records.
    fn is_game_master(&self) -> bool;
}

/// Where the migration stands according to the persisted flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationState {
    /// The flag is unset or could not be read.
    Pending,
    /// The flag is set.
    Complete,
}

/// A record the migration could not write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFailure {
    /// The record that failed.
    pub id: RecordId,
    /// Its display name.
    pub name: String,
    /// Why the write failed.
    pub error: String,
}

/// What a migration pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Actors written.
    pub actors_updated: usize,
    /// Items written, owned and world-level together.
    pub items_updated: usize,
    /// Records whose write failed. The pass continued past each of them.
    pub failures: Vec<RecordFailure>,
    /// Whether the completion flag was persisted afterwards.
    pub flag_saved: bool,
}

impl MigrationReport {
    /// Total records written.
    pub fn writes(&self) -> usize {
        self.actors_updated + self.items_updated
    }

    fn fail(&mut self, id: RecordId, name: &str, error: &CoreError) {
        warn!(record = %id, name, error = %error, "migration write failed, continuing");
        self.failures.push(RecordFailure {
            id,
            name: name.to_string(),
            error: error.to_string(),
        });
    }
}

/// The result of the ready-time hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadyOutcome {
    /// The operator is not a game master; nothing was read or written.
    NotPermitted,
    /// The flag was already set.
    AlreadyComplete,
    /// A pass ran.
    Migrated(MigrationReport),
}

/// Read the completion flag. A read error counts as pending, which is safe
/// because a pass over migrated records writes nothing.
pub fn migration_state<S: SettingsStore + ?Sized>(
    settings: &S,
    table: &MigrationTable,
) -> MigrationState {
    match settings.get_flag(&table.namespace, &table.flag_key) {
        Ok(true) => MigrationState::Complete,
        Ok(false) => MigrationState::Pending,
        Err(e) => {
            warn!(error = %e, "could not read migration flag, treating as pending");
            MigrationState::Pending
        }
    }
}

/// Migrate every delta actor, its powers, then every world-level power.
///
/// Records are visited in storage order, one write at a time. A failed write
/// is logged and recorded in the report; the pass moves on to the next record.
pub fn migrate_records<S: RecordStore + ?Sized>(
    store: &mut S,
    table: &MigrationTable,
) -> MigrationReport {
    let mut report = MigrationReport::default();

    for actor_id in store.actor_ids() {
        let Some(actor) = store.actor(actor_id) else {
            continue;
        };
        if actor.kind != ActorKind::Delta {
            continue;
        }
        let name = actor.name.clone();
        let patch = migrate_actor(&actor.system, table);
        let owned: Vec<_> = actor
            .powers()
            .map(|item| (item.id, item.name.clone(), migrate_item(&item.system, table)))
            .filter(|(_, _, patch)| !patch.is_empty())
            .collect();

        if !patch.is_empty() {
            match store.update_actor(actor_id, &patch) {
                Ok(()) => {
                    debug!(actor = %name, "migrated actor");
                    report.actors_updated += 1;
                }
                Err(e) => report.fail(actor_id, &name, &e),
            }
        }

        for (item_id, item_name, patch) in owned {
            let location = ItemLocation::Owned {
                actor: actor_id,
                item: item_id,
            };
            match store.update_item(location, &patch) {
                Ok(()) => {
                    debug!(actor = %name, item = %item_name, "migrated owned power");
                    report.items_updated += 1;
                }
                Err(e) => report.fail(item_id, &item_name, &e),
            }
        }
    }

    for item_id in store.world_item_ids() {
        let Some(item) = store.world_item(item_id) else {
            continue;
        };
        if item.kind != ItemKind::Power {
            continue;
        }
        let patch = migrate_item(&item.system, table);
        if patch.is_empty() {
            continue;
        }
        let name = item.name.clone();
        match store.update_item(ItemLocation::World(item_id), &patch) {
            Ok(()) => {
                debug!(item = %name, "migrated world power");
                report.items_updated += 1;
            }
            Err(e) => report.fail(item_id, &name, &e),
        }
    }

    report
}

/// The ready-time hook: if the operator is a game master and the flag is not
/// set, migrate every record and then set the flag.
///
/// Never fails. Failing to persist the flag is logged and shows up as
/// `flag_saved: false`; the next ready re-runs a pass that writes nothing.
pub fn run_ready_migration<S>(
    store: &mut S,
    operator: &dyn Operator,
    table: &MigrationTable,
) -> ReadyOutcome
where
    S: RecordStore + SettingsStore + ?Sized,
{
    if !operator.is_game_master() {
        debug!("operator is not a game master, skipping trait migration");
        return ReadyOutcome::NotPermitted;
    }
    if migration_state(&*store, table) == MigrationState::Complete {
        debug!("trait migration already complete");
        return ReadyOutcome::AlreadyComplete;
    }

    let mut report = migrate_records(store, table);
    match store.set_flag(&table.namespace, &table.flag_key, true) {
        Ok(()) => report.flag_saved = true,
        Err(e) => warn!(error = %e, "could not save migration flag"),
    }

    info!(
        actors = report.actors_updated,
        items = report.items_updated,
        failures = report.failures.len(),
        "trait migration finished"
    );
    ReadyOutcome::Migrated(report)
}
