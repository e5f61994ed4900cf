//! Roll resolution.
//!
//! A roll is resolved in two phases. [`RollResolver::compute_roll`] is pure:
//! it reads a character snapshot, throws the dice through the injected source
//! and returns the outcome together with the [`StateDelta`] the roll implies.
//! [`RollResolver::resolve_stat_roll`] does the same and then applies the
//! delta to the character, for callers that hold the state in hand.
//!
//! Pool selection:
//!
//! | harm >= threshold | Something Extra | pool           | tag            |
//! |-------------------|-----------------|----------------|----------------|
//! | yes               | yes             | 2d6            | cancelOut      |
//! | yes               | no              | 3d6 keep low 2 | somethingLess  |
//! | no                | yes             | 3d6 keep high 2| somethingExtra |
//! | no                | no              | 2d6            | normal         |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::RulesConfig;
use crate::entities::{CharacterState, MoveDefinition};
use crate::error::DomainError;
use crate::value_objects::{DiceFormula, ResultTier, RollTag, Stat, Thresholds};

/// Per-move parameters layered on top of a stat roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRoll {
    pub thresholds: Thresholds,
    pub modifier: i32,
}

impl From<&MoveDefinition> for MoveRoll {
    fn from(definition: &MoveDefinition) -> Self {
        Self {
            thresholds: definition.thresholds(),
            modifier: definition.modifier,
        }
    }
}

/// State change a roll asks the caller to commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDelta {
    /// Clear the temporary modifier and Something Extra
    pub reset_temporary_modifiers: bool,
}

impl StateDelta {
    pub fn reset_temporary_modifiers() -> Self {
        Self {
            reset_temporary_modifiers: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.reset_temporary_modifiers
    }
}

/// Everything a roll produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollOutcome {
    pub stat: Stat,
    /// Pool plus the flat total of all modifiers
    pub formula: DiceFormula,
    /// Every die, in roll order
    pub rolled_dice: Vec<i32>,
    pub kept_dice: Vec<i32>,
    pub dropped_dice: Vec<i32>,
    pub total: i32,
    pub tag: RollTag,
    pub tier: ResultTier,
    pub thresholds: Thresholds,
    pub effective_stat: i32,
    pub temporary_modifier_applied: i32,
    pub move_modifier_applied: i32,
}

impl RollOutcome {
    pub fn dice_total(&self) -> i32 {
        self.kept_dice.iter().sum()
    }

    /// Plain-text breakdown, e.g.
    /// `Rolled: [2, 5, 6] -> Kept highest: [5, 6] + 2 (Might) - 1 (temp) = 12`
    pub fn breakdown(&self) -> String {
        let rolled = join_dice(&self.rolled_dice);
        let mut out = match self.tag {
            RollTag::SomethingExtra => format!(
                "Rolled: [{}] -> Kept highest: [{}]",
                rolled,
                join_dice(&self.kept_dice)
            ),
            RollTag::SomethingLess => format!(
                "Rolled: [{}] -> Kept lowest: [{}]",
                rolled,
                join_dice(&self.kept_dice)
            ),
            RollTag::Normal | RollTag::CancelOut => format!("Rolled: [{}]", rolled),
        };

        push_term(&mut out, self.effective_stat, self.stat.display_name());
        if self.temporary_modifier_applied != 0 {
            push_term(&mut out, self.temporary_modifier_applied, "temp");
        }
        if self.move_modifier_applied != 0 {
            push_term(&mut out, self.move_modifier_applied, "move");
        }
        out.push_str(&format!(" = {}", self.total));
        out
    }

    /// One-line headline, e.g. `Might (Something Less): 8 - Partial`
    pub fn summary(&self) -> String {
        match self.tag.description() {
            Some(description) => format!(
                "{} ({}): {} - {}",
                self.stat.display_name(),
                description,
                self.total,
                self.tier
            ),
            None => format!(
                "{}: {} - {}",
                self.stat.display_name(),
                self.total,
                self.tier
            ),
        }
    }
}

fn join_dice(dice: &[i32]) -> String {
    dice.iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn push_term(out: &mut String, value: i32, label: &str) {
    if value < 0 {
        out.push_str(&format!(" - {} ({})", value.unsigned_abs(), label));
    } else {
        out.push_str(&format!(" + {} ({})", value, label));
    }
}

/// Outcome plus the state change still to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedRoll {
    pub outcome: RollOutcome,
    pub delta: StateDelta,
}

/// Resolves stat and move rolls against a character.
#[derive(Debug, Clone, Copy, Default)]
pub struct RollResolver {
    config: RulesConfig,
}

impl RollResolver {
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Compute a roll without touching the character.
    ///
    /// Fails before any die is requested with [`DomainError::InvalidStat`]
    /// when `stat_key` is not a stat the character has, or with
    /// [`DomainError::Validation`] when the modifiers cannot be summed
    /// into an `i32` total.
    pub fn compute_roll<F>(
        &self,
        character: &CharacterState,
        stat_key: &str,
        move_roll: Option<MoveRoll>,
        roll_fn: F,
    ) -> Result<ComputedRoll, DomainError>
    where
        F: FnMut(i32, i32) -> i32,
    {
        let stat = Stat::from_str(stat_key)?;
        let effective_stat = character
            .effective_stat(stat)
            .ok_or_else(|| DomainError::invalid_stat(stat_key))?;

        let lessened = character.harm().is_lessened(self.config.something_less_at);
        let modifiers = character.modifiers();
        let tag = RollTag::select(lessened, modifiers.something_extra);

        let move_modifier = move_roll.map_or(0, |m| m.modifier);
        let thresholds = move_roll.map_or_else(|| self.config.default_thresholds(), |m| m.thresholds);

        let pool = tag.pool();
        let flat_modifier = effective_stat
            .checked_add(modifiers.temporary)
            .and_then(|sum| sum.checked_add(move_modifier))
            .filter(|sum| sum.checked_add(pool.max_total()).is_some())
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "Modifiers out of range: {} {} + {} (temp) + {} (move)",
                    stat.display_name(),
                    effective_stat,
                    modifiers.temporary,
                    move_modifier
                ))
            })?;
        let formula = DiceFormula::new(pool, flat_modifier);
        let dice = formula.pool.roll(roll_fn);
        let total = dice.kept_total() + flat_modifier;
        let tier = ResultTier::from_total(total, thresholds);

        Ok(ComputedRoll {
            outcome: RollOutcome {
                stat,
                formula,
                rolled_dice: dice.rolled,
                kept_dice: dice.kept,
                dropped_dice: dice.dropped,
                total,
                tag,
                tier,
                thresholds,
                effective_stat,
                temporary_modifier_applied: modifiers.temporary,
                move_modifier_applied: move_modifier,
            },
            delta: StateDelta::reset_temporary_modifiers(),
        })
    }

    /// Compute a roll and commit its state change to `character`.
    ///
    /// On error the character is left exactly as it was.
    pub fn resolve_stat_roll<F>(
        &self,
        character: &mut CharacterState,
        stat_key: &str,
        move_roll: Option<MoveRoll>,
        roll_fn: F,
    ) -> Result<RollOutcome, DomainError>
    where
        F: FnMut(i32, i32) -> i32,
    {
        let computed = self.compute_roll(character, stat_key, move_roll, roll_fn)?;
        character.apply_delta(&computed.delta);
        Ok(computed.outcome)
    }

    /// Compute a roll for a move, using its stat, modifier and thresholds.
    pub fn compute_move_roll<F>(
        &self,
        character: &CharacterState,
        definition: &MoveDefinition,
        roll_fn: F,
    ) -> Result<ComputedRoll, DomainError>
    where
        F: FnMut(i32, i32) -> i32,
    {
        self.compute_roll(
            character,
            definition.stat.as_str(),
            Some(MoveRoll::from(definition)),
            roll_fn,
        )
    }
}
