pub mod init;
pub mod migrate;
pub mod power;
pub mod roll;
pub mod sheet;

use std::path::Path;

use bnw_core::{
    ActorPatch, ActorRecord, Campaign, CoreResult, ItemLocation, ItemPatch, ItemRecord, RecordId,
    RecordStore, SettingsStore,
};
use bnw_mechanics::{
    ChatCard, MechError, MechResult, RandomDice, ReadyOutcome, RollContext, SystemConfig,
    TargetResolver, run_ready_migration,
};
use tracing::info;

use crate::host::{Seat, StderrNotices, StdinPrompt, TerminalChat, TtyPrompt};

/// Options shared by the rolling commands.
pub struct RollOptions<'a> {
    pub file: &'a Path,
    pub target: Option<i64>,
    pub seed: Option<u64>,
    pub json: bool,
}

/// A campaign whose file is rewritten after every record update, so an
/// interrupted migration leaves the records it already finished on disk.
struct CampaignFile<'a> {
    campaign: Campaign,
    path: &'a Path,
}

impl CampaignFile<'_> {
    fn save(&self) -> CoreResult<()> {
        self.campaign.save(self.path)
    }
}

impl RecordStore for CampaignFile<'_> {
    fn actor_ids(&self) -> Vec<RecordId> {
        self.campaign.actor_ids()
    }

    fn actor(&self, id: RecordId) -> Option<&ActorRecord> {
        self.campaign.actor(id)
    }

    fn world_item_ids(&self) -> Vec<RecordId> {
        self.campaign.world_item_ids()
    }

    fn world_item(&self, id: RecordId) -> Option<&ItemRecord> {
        self.campaign.world_item(id)
    }

    fn update_actor(&mut self, id: RecordId, patch: &ActorPatch) -> CoreResult<()> {
        self.campaign.update_actor(id, patch)?;
        self.save()
    }

    fn update_item(&mut self, location: ItemLocation, patch: &ItemPatch) -> CoreResult<()> {
        self.campaign.update_item(location, patch)?;
        self.save()
    }
}

impl SettingsStore for CampaignFile<'_> {
    fn get_flag(&self, namespace: &str, key: &str) -> CoreResult<bool> {
        self.campaign.get_flag(namespace, key)
    }

    fn set_flag(&mut self, namespace: &str, key: &str, value: bool) -> CoreResult<()> {
        self.campaign.set_flag(namespace, key, value)?;
        self.save()
    }
}

/// Load a campaign file and fire the ready hook for whoever is seated.
fn open_as(
    path: &Path,
    config: &SystemConfig,
    seat: &Seat,
) -> Result<(Campaign, ReadyOutcome), String> {
    let campaign = Campaign::load(path).map_err(|e| e.to_string())?;
    let mut file = CampaignFile { campaign, path };
    let outcome = run_ready_migration(&mut file, seat, &config.migration);
    if let ReadyOutcome::Migrated(report) = &outcome {
        info!(
            file = %path.display(),
            writes = report.writes(),
            "campaign ready"
        );
    }
    Ok((file.campaign, outcome))
}

/// Load a campaign file as the game master.
fn open(path: &Path, config: &SystemConfig) -> Result<Campaign, String> {
    open_as(path, config, &Seat { game_master: true }).map(|(campaign, _)| campaign)
}

fn find_actor<'c>(campaign: &'c Campaign, name: &str) -> Result<&'c ActorRecord, String> {
    campaign
        .find_actor_by_name(name)
        .ok_or_else(|| MechError::UnknownActor(name.to_string()).to_string())
}

/// Run one roll against the terminal: stdin prompt (then the controlling
/// terminal if stdin fails), stdout chat, stderr warnings.
fn roll_at_table(
    options: &RollOptions<'_>,
    config: &SystemConfig,
    roll: impl FnOnce(&mut RollContext<'_>) -> MechResult<Option<ChatCard>>,
) -> Result<(), String> {
    let mut dice = match options.seed {
        Some(seed) => RandomDice::seeded(seed),
        None => RandomDice::from_os(),
    };
    let mut chat = TerminalChat { json: options.json };
    let mut ui = StderrNotices;
    let mut context = RollContext {
        resolver: TargetResolver::new(config)
            .with_surface(StdinPrompt)
            .with_surface(TtyPrompt::default()),
        dice: &mut dice,
        chat: &mut chat,
        ui: &mut ui,
        max_pool: config.max_pool,
    };

    if roll(&mut context).map_err(|e| e.to_string())?.is_none() {
        eprintln!("Roll cancelled.");
    }
    Ok(())
}
