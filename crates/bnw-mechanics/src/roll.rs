//! Trait + skill tests against a character, end to end.
//!
//! [`RollContext`] bundles the host collaborators a roll needs (dice, target
//! prompt, chat, notifications) and runs the sequence: pool, target, dice,
//! runs, evaluation, chat card. A cancelled prompt ends the roll with nothing
//! rolled and nothing published.

use bnw_core::{ActorRecord, RecordId, SkillEntry, TraitEntry};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::label_or_key;
use crate::dice::DieSource;
use crate::error::{MechError, MechResult};
use crate::pool::pool_size;
use crate::resolution::{RollOutcome, resolve_pool};
use crate::target::TargetResolver;

/// Publishing a chat card failed.
#[derive(Debug, thiserror::Error)]
#[error("cannot publish chat card: {0}")]
pub struct PublishError(pub String);

/// Where finished rolls are shown.
pub trait ChatPublisher {
    /// Publish a roll result.
    fn publish(&mut self, card: &ChatCard) -> Result<(), PublishError>;
}

/// User-visible notifications.
pub trait Notifications {
    /// Show a warning to the operator.
    fn warn(&mut self, message: &str);
}

/// What to roll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollRequest {
    /// The trait to roll.
    pub trait_key: String,
    /// The skill to add, if any.
    pub skill_key: Option<String>,
    /// A fixed target number. When absent the operator is asked.
    pub target: Option<i64>,
    /// Extra dice for the pool (may be negative).
    pub bonus_dice: i64,
    /// Title for the chat card. Blank picks one from the skill and trait.
    pub label: String,
    /// The item the roll came from.
    pub source_item: Option<RecordId>,
}

impl RollRequest {
    /// A roll of a single trait.
    pub fn new(trait_key: impl Into<String>) -> Self {
        Self {
            trait_key: trait_key.into(),
            ..Self::default()
        }
    }

    /// Add a skill. A blank key means no skill.
    pub fn with_skill(mut self, skill_key: impl Into<String>) -> Self {
        let key = skill_key.into();
        self.skill_key = (!key.trim().is_empty()).then_some(key);
        self
    }

    /// Fix the target number instead of asking.
    pub fn with_target(mut self, target: i64) -> Self {
        self.target = Some(target);
        self
    }

    /// Add bonus dice.
    pub fn with_bonus(mut self, bonus_dice: i64) -> Self {
        self.bonus_dice = bonus_dice;
        self
    }

    /// Set the chat card title.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Machine-readable roll data attached to the chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatFlags {
    /// Trait key rolled.
    #[serde(rename = "trait")]
    pub trait_key: String,
    /// Skill key rolled, if any.
    pub skill: Option<String>,
    /// Target number.
    pub target: u32,
    /// Highest run total.
    pub highest: u32,
    /// Dice in the pool.
    pub pool: u32,
    /// Bonus dice as requested, including zero or negative values.
    pub bonus_dice: i64,
    /// The item the roll came from.
    pub item_id: Option<RecordId>,
}

/// The flat payload handed to the chat surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCard {
    /// Who is speaking (the actor's name).
    pub speaker: String,
    /// Actor name.
    pub actor_name: String,
    /// Label of the trait rolled.
    pub trait_label: String,
    /// Label of the skill rolled, or the roll label when there is none.
    pub skill_label: String,
    /// Dice in the pool.
    pub pool: u32,
    /// Run totals in roll order.
    pub dice: Vec<u32>,
    /// Highest run total.
    pub highest: u32,
    /// Target number.
    pub target: u32,
    /// True if the highest run met the target.
    pub success: bool,
    /// Bonus dice, shown only when positive.
    pub bonus_dice: Option<i64>,
    /// Card title.
    pub title: String,
    /// Machine-readable roll data.
    pub flags: ChatFlags,
}

/// The host collaborators a roll needs.
pub struct RollContext<'a> {
    /// Target number resolver and its prompt surfaces.
    pub resolver: TargetResolver<'a>,
    /// Dice.
    pub dice: &'a mut dyn DieSource,
    /// Chat surface.
    pub chat: &'a mut dyn ChatPublisher,
    /// Operator notifications.
    pub ui: &'a mut dyn Notifications,
    /// Largest pool that may be rolled.
    pub max_pool: u32,
}

impl RollContext<'_> {
    /// Roll a trait (and optionally a skill) for an actor and publish the card.
    ///
    /// Returns `Ok(None)` if the operator cancelled the target prompt. An
    /// unknown trait or a pool above `max_pool` is warned about and fails the
    /// roll before any dice are rolled; an unknown skill is warned about and
    /// counts as 0.
    pub fn roll_trait_skill(
        &mut self,
        actor: &ActorRecord,
        request: &RollRequest,
    ) -> MechResult<Option<ChatCard>> {
        let Some(trait_entry) = actor.system.traits.get(&request.trait_key) else {
            warn!(actor = %actor.name, trait_key = %request.trait_key, "unknown trait, roll aborted");
            self.ui
                .warn(&format!("Unknown trait: {}", request.trait_key));
            return Err(MechError::UnknownTrait(request.trait_key.clone()));
        };

        let skill = request.skill_key.as_deref().and_then(|key| {
            let found = actor.system.skills.get(key);
            if found.is_none() {
                warn!(actor = %actor.name, skill = key, "unknown skill, rolling trait only");
                self.ui.warn(&format!("Unknown skill: {key}"));
            }
            found
        });

        let pool = pool_size(
            trait_entry.value,
            skill.map_or(0, |s| s.value),
            request.bonus_dice,
        );
        if pool > self.max_pool {
            warn!(actor = %actor.name, pool, max = self.max_pool, "pool too large, roll aborted");
            self.ui.warn(&format!(
                "Pool of {pool} dice exceeds the limit of {}",
                self.max_pool
            ));
            return Err(MechError::PoolTooLarge {
                pool,
                max: self.max_pool,
            });
        }

        let labels = Labels::new(request, trait_entry, skill);
        let Some(target) = self.resolver.resolve(request.target, &labels.context) else {
            debug!(actor = %actor.name, "roll cancelled at target prompt");
            return Ok(None);
        };

        let outcome = resolve_pool(pool, target, &mut *self.dice);
        info!(
            actor = %actor.name,
            trait_key = %request.trait_key,
            pool,
            target,
            highest = outcome.highest,
            success = outcome.success,
            "rolled"
        );

        let card = build_card(actor, request, labels, &outcome);
        self.chat.publish(&card)?;
        Ok(Some(card))
    }

    /// Roll one of the actor's powers: its trait, skill, and bonus dice, with
    /// the power's name as the card title.
    pub fn roll_power(
        &mut self,
        actor: &ActorRecord,
        item_id: RecordId,
        target: Option<i64>,
    ) -> MechResult<Option<ChatCard>> {
        let item = actor
            .item(item_id)
            .ok_or_else(|| MechError::UnknownItem(item_id.to_string()))?;
        let mut request = RollRequest::new(item.system.trait_key.clone())
            .with_skill(item.system.skill.clone())
            .with_bonus(item.system.dice)
            .with_label(item.name.clone());
        request.target = target;
        request.source_item = Some(item.id);
        self.roll_trait_skill(actor, &request)
    }
}

/// The display strings a roll carries.
struct Labels {
    trait_label: String,
    skill_label: String,
    title: String,
    context: String,
}

impl Labels {
    fn new(request: &RollRequest, trait_entry: &TraitEntry, skill: Option<&SkillEntry>) -> Self {
        let trait_label = label_or_key(&trait_entry.label, &request.trait_key);
        let found_skill_label = skill.and_then(|s| non_blank(&s.label));
        let skill_label = found_skill_label
            .or(request.skill_key.as_deref())
            .unwrap_or(&request.label);

        let title = if let Some(label) = non_blank(&request.label) {
            label.to_string()
        } else if let Some(skill_label) = found_skill_label {
            format!("{skill_label} ({trait_label})")
        } else {
            trait_label.clone()
        };

        let context = [skill_label, trait_label.as_str()]
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" / ");

        Self {
            trait_label,
            skill_label: skill_label.to_string(),
            title,
            context,
        }
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn build_card(
    actor: &ActorRecord,
    request: &RollRequest,
    labels: Labels,
    outcome: &RollOutcome,
) -> ChatCard {
    ChatCard {
        speaker: actor.name.clone(),
        actor_name: actor.name.clone(),
        trait_label: labels.trait_label,
        skill_label: labels.skill_label,
        pool: outcome.pool,
        dice: outcome.runs.clone(),
        highest: outcome.highest,
        target: outcome.target,
        success: outcome.success,
        bonus_dice: (request.bonus_dice > 0).then_some(request.bonus_dice),
        title: labels.title,
        flags: ChatFlags {
            trait_key: request.trait_key.clone(),
            skill: request.skill_key.clone(),
            target: outcome.target,
            highest: outcome.highest,
            pool: outcome.pool,
            bonus_dice: request.bonus_dice,
            item_id: request.source_item,
        },
    }
}
