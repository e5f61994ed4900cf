//! Derived sheet data.
//!
//! Everything a sheet or adapter shows that is computed rather than stored.
//! Recomputed from scratch on every call.

use serde::{Deserialize, Serialize};

use super::RulesConfig;
use crate::entities::CharacterState;
use crate::value_objects::{HarmLevel, Scar, Stat, TemporaryModifiers};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStat {
    pub stat: Stat,
    pub value: i32,
    pub scar_penalty: i32,
    pub effective: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedState {
    pub stats: Vec<DerivedStat>,
    pub active_scars: Vec<Scar>,
    pub harm: u8,
    pub harm_level: HarmLevel,
    pub harm_display_max: u8,
    /// Whether the next roll will be Something Less
    pub something_less: bool,
    pub modifiers: TemporaryModifiers,
}

/// Compute the derived view of a character.
pub fn derive_effective_data(state: &CharacterState, config: &RulesConfig) -> DerivedState {
    DerivedState {
        stats: state
            .stats()
            .map(|(stat, score)| DerivedStat {
                stat,
                value: score.value,
                scar_penalty: score.scar_penalty,
                effective: score.effective(),
            })
            .collect(),
        active_scars: state.active_scars().collect(),
        harm: state.harm().value(),
        harm_level: state.harm().level(),
        harm_display_max: state.kind().harm_display_max(),
        something_less: state.harm().is_lessened(config.something_less_at),
        modifiers: state.modifiers(),
    }
}
