//! Roll use cases.
//!
//! A roll is computed against a snapshot of the character, then the
//! resulting state change (clearing temporary modifiers) is written back
//! through [`CharacterRepo::apply_delta`], so edits stored while the roll was
//! in flight survive. A failed write does not undo the roll: the record is
//! returned and the failure is logged.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spirit77_domain::{
    CharacterId, CharacterState, ComputedRoll, DiceFormula, FormulaRoll, Item, ItemId, ItemKind,
    RollOutcome, RollResolver,
};

mod error;

pub use error::RollError;

use crate::infrastructure::ports::{CharacterRepo, ClockPort, ItemRepo, RandomPort};

/// Container for roll use cases.
pub struct RollUseCases {
    pub stat: Arc<RollStat>,
    pub moves: Arc<RollMove>,
    pub items: Arc<RollItem>,
}

impl RollUseCases {
    pub fn new(stat: Arc<RollStat>, moves: Arc<RollMove>, items: Arc<RollItem>) -> Self {
        Self { stat, moves, items }
    }
}

/// A resolved roll, ready to be rendered by whatever surface asked for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollRecord {
    pub character_id: CharacterId,
    pub character_name: String,
    /// Stat display name for stat rolls, move name for move rolls
    pub label: String,
    pub outcome: RollOutcome,
    /// The move's text for the tier reached; `None` for plain stat rolls
    pub result_text: Option<String>,
    pub rolled_at: DateTime<Utc>,
}

/// What a roll produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RollResult {
    /// Stat and move rolls, classified into a tier
    Resolved(RollRecord),
    /// Other items with a `rollFormula` roll it as written
    Formula {
        character_id: CharacterId,
        character_name: String,
        item_name: String,
        roll: FormulaRoll,
        rolled_at: DateTime<Utc>,
    },
    /// Items without a formula just show their description
    Description {
        character_id: CharacterId,
        character_name: String,
        item_name: String,
        text: String,
    },
}

/// Roll a bare stat.
pub struct RollStat {
    characters: Arc<dyn CharacterRepo>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
    resolver: RollResolver,
}

impl RollStat {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
        resolver: RollResolver,
    ) -> Self {
        Self {
            characters,
            random,
            clock,
            resolver,
        }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
        stat_key: &str,
    ) -> Result<RollRecord, RollError> {
        let character = self
            .characters
            .get(character_id)
            .await?
            .ok_or(RollError::CharacterNotFound(character_id))?;

        let computed = self.resolver.compute_roll(&character, stat_key, None, |min, max| {
            self.random.gen_range(min, max)
        })?;
        let label = computed.outcome.stat.display_name().to_string();

        Ok(commit_roll(
            self.characters.as_ref(),
            &character,
            computed,
            label,
            None,
            self.clock.now(),
        )
        .await)
    }
}

/// Roll one of the character's moves.
pub struct RollMove {
    characters: Arc<dyn CharacterRepo>,
    items: Arc<dyn ItemRepo>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
    resolver: RollResolver,
}

impl RollMove {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        items: Arc<dyn ItemRepo>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
        resolver: RollResolver,
    ) -> Self {
        Self {
            characters,
            items,
            random,
            clock,
            resolver,
        }
    }

    /// Execute a move roll.
    ///
    /// # Returns
    /// * `Ok(RollRecord)` - with the move's text for the tier reached
    /// * `Err(RollError::NotOwned)` - the item belongs to someone else
    /// * `Err(RollError::NotAMove)` - the item is gear, a vehicle, etc.
    pub async fn execute(
        &self,
        character_id: CharacterId,
        item_id: ItemId,
    ) -> Result<RollRecord, RollError> {
        let character = self
            .characters
            .get(character_id)
            .await?
            .ok_or(RollError::CharacterNotFound(character_id))?;
        let item = owned_item(self.items.as_ref(), character_id, item_id).await?;
        if item.kind != ItemKind::Move {
            return Err(RollError::NotAMove { name: item.name });
        }

        let definition = item.move_definition()?;
        let computed = self
            .resolver
            .compute_move_roll(&character, &definition, |min, max| {
                self.random.gen_range(min, max)
            })?;
        let result_text = definition.result_text(computed.outcome.tier).to_string();

        Ok(commit_roll(
            self.characters.as_ref(),
            &character,
            computed,
            definition.name,
            Some(result_text),
            self.clock.now(),
        )
        .await)
    }
}

/// Use any owned item: moves roll as moves, everything else rolls its
/// formula or falls back to its description.
pub struct RollItem {
    characters: Arc<dyn CharacterRepo>,
    items: Arc<dyn ItemRepo>,
    moves: Arc<RollMove>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
}

impl RollItem {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        items: Arc<dyn ItemRepo>,
        moves: Arc<RollMove>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            characters,
            items,
            moves,
            random,
            clock,
        }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
        item_id: ItemId,
    ) -> Result<RollResult, RollError> {
        let character = self
            .characters
            .get(character_id)
            .await?
            .ok_or(RollError::CharacterNotFound(character_id))?;
        let item = owned_item(self.items.as_ref(), character_id, item_id).await?;

        if item.kind == ItemKind::Move {
            return self
                .moves
                .execute(character_id, item_id)
                .await
                .map(RollResult::Resolved);
        }

        let Some(text) = item.roll_formula() else {
            return Ok(RollResult::Description {
                character_id,
                character_name: character.name().to_string(),
                text: item.description().to_string(),
                item_name: item.name,
            });
        };

        let formula = DiceFormula::parse(text)?;
        let roll = formula.roll(|min, max| self.random.gen_range(min, max));
        tracing::info!(
            character = %character.name(),
            item = %item.name,
            formula = %formula,
            total = roll.total,
            "Item rolled"
        );

        Ok(RollResult::Formula {
            character_id,
            character_name: character.name().to_string(),
            item_name: item.name,
            roll,
            rolled_at: self.clock.now(),
        })
    }

    /// Find one of the character's items by name, ignoring case.
    pub async fn find_owned_item(
        &self,
        character_id: CharacterId,
        name: &str,
    ) -> Result<Item, RollError> {
        let wanted = name.trim().to_lowercase();
        self.items
            .list_owned_by(character_id)
            .await?
            .into_iter()
            .find(|item| item.name.to_lowercase() == wanted)
            .ok_or_else(|| RollError::ItemNamedNotFound {
                name: name.to_string(),
            })
    }
}

async fn owned_item(
    items: &dyn ItemRepo,
    character_id: CharacterId,
    item_id: ItemId,
) -> Result<Item, RollError> {
    let item = items
        .get(item_id)
        .await?
        .ok_or(RollError::ItemNotFound(item_id))?;
    if item.owner != Some(character_id) {
        return Err(RollError::NotOwned {
            item: item_id,
            character: character_id,
        });
    }
    Ok(item)
}

async fn commit_roll(
    characters: &dyn CharacterRepo,
    character: &CharacterState,
    computed: ComputedRoll,
    label: String,
    result_text: Option<String>,
    rolled_at: DateTime<Utc>,
) -> RollRecord {
    let ComputedRoll { outcome, delta } = computed;

    tracing::info!(
        character = %character.name(),
        label = %label,
        total = outcome.total,
        tier = %outcome.tier,
        tag = ?outcome.tag,
        "Roll resolved"
    );

    if !delta.is_empty() && !character.modifiers().is_cleared() {
        if let Err(e) = characters.apply_delta(character.id(), &delta).await {
            tracing::warn!(
                character_id = %character.id(),
                error = %e,
                "Failed to persist roll state change"
            );
        }
    }

    RollRecord {
        character_id: character.id(),
        character_name: character.name().to_string(),
        label,
        outcome,
        result_text,
        rolled_at,
    }
}
