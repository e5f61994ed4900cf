//! Character entity - the state every roll reads from.
//!
//! A character exclusively owns its stats, active scars, harm counter and
//! temporary modifiers. Scar penalties are derived data: they are recomputed
//! from the active scar set after every scar change and after loading, never
//! adjusted incrementally.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::CharacterId;
use crate::rules::StateDelta;
use crate::value_objects::{Harm, Scar, Stat, StatScore, TemporaryModifiers, SCAR_PENALTY};

/// Whether the actor is a player character or an NPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterKind {
    #[default]
    Character,
    Npc,
}

impl CharacterKind {
    /// Highest harm box shown on the sheet.
    ///
    /// NPCs only show five boxes. This is display data; harm itself is
    /// clamped to [0, 8] for every kind.
    pub fn harm_display_max(&self) -> u8 {
        match self {
            Self::Character => Harm::MAX,
            Self::Npc => 5,
        }
    }
}

/// A character's rollable state.
///
/// # Invariants
///
/// - `harm` is always within [0, 8]
/// - each stat's `scar_penalty` is -1 when at least one active scar is bound
///   to it and 0 otherwise; two scars on one stat do not stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CharacterStateData")]
pub struct CharacterState {
    id: CharacterId,
    name: String,
    kind: CharacterKind,
    stats: BTreeMap<Stat, StatScore>,
    scars: BTreeSet<Scar>,
    harm: Harm,
    modifiers: TemporaryModifiers,
}

impl CharacterState {
    /// Create a character with all five stats at zero.
    pub fn new(name: impl Into<String>, kind: CharacterKind) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            kind,
            stats: Stat::ALL.iter().map(|s| (*s, StatScore::new(0))).collect(),
            scars: BTreeSet::new(),
            harm: Harm::default(),
            modifiers: TemporaryModifiers::default(),
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    pub fn with_id(mut self, id: CharacterId) -> Self {
        self.id = id;
        self
    }

    pub fn with_stat(mut self, stat: Stat, value: i32) -> Self {
        self.set_stat(stat, value);
        self
    }

    pub fn with_harm(mut self, harm: i32) -> Self {
        self.harm = Harm::new(harm);
        self
    }

    pub fn with_modifiers(mut self, modifiers: TemporaryModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_scar(mut self, scar: Scar) -> Self {
        self.scars.insert(scar);
        self.refresh_scar_penalties();
        self
    }

    /// Drop a stat entirely, e.g. for NPC stat blocks that only track some.
    pub fn without_stat(mut self, stat: Stat) -> Self {
        self.stats.remove(&stat);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CharacterKind {
        self.kind
    }

    pub fn harm(&self) -> Harm {
        self.harm
    }

    pub fn modifiers(&self) -> TemporaryModifiers {
        self.modifiers
    }

    pub fn stat(&self, stat: Stat) -> Option<&StatScore> {
        self.stats.get(&stat)
    }

    pub fn stats(&self) -> impl Iterator<Item = (Stat, &StatScore)> {
        self.stats.iter().map(|(k, v)| (*k, v))
    }

    pub fn active_scars(&self) -> impl Iterator<Item = Scar> + '_ {
        self.scars.iter().copied()
    }

    pub fn has_scar(&self, scar: Scar) -> bool {
        self.scars.contains(&scar)
    }

    /// Effective value of a stat, or 0 when the key is unknown or the
    /// character has no such stat.
    pub fn effective_value(&self, stat_key: &str) -> i32 {
        Stat::from_str(stat_key)
            .ok()
            .and_then(|stat| self.effective_stat(stat))
            .unwrap_or(0)
    }

    /// Effective value of a stat the character actually has.
    pub fn effective_stat(&self, stat: Stat) -> Option<i32> {
        self.stats.get(&stat).map(StatScore::effective)
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Set a stat's base value, adding the stat if it was missing.
    pub fn set_stat(&mut self, stat: Stat, value: i32) {
        self.stats.entry(stat).or_default().value = value;
        self.refresh_scar_penalties();
    }

    /// Add harm, clamped to the track. Returns the new harm.
    pub fn apply_harm(&mut self, amount: i32) -> Harm {
        self.harm = self.harm.apply(amount);
        self.harm
    }

    /// Remove harm, clamped to the track. Returns the new harm.
    pub fn heal_harm(&mut self, amount: i32) -> Harm {
        self.harm = self.harm.heal(amount);
        self.harm
    }

    /// Flip a scar. Returns whether it is now active.
    pub fn toggle_scar(&mut self, scar_id: &str) -> Result<bool, DomainError> {
        let scar = Scar::from_str(scar_id)?;
        let active = if self.scars.remove(&scar) {
            false
        } else {
            self.scars.insert(scar);
            true
        };
        self.refresh_scar_penalties();
        Ok(active)
    }

    pub fn apply_scar(&mut self, scar_id: &str) -> Result<(), DomainError> {
        let scar = Scar::from_str(scar_id)?;
        self.scars.insert(scar);
        self.refresh_scar_penalties();
        Ok(())
    }

    pub fn remove_scar(&mut self, scar_id: &str) -> Result<(), DomainError> {
        let scar = Scar::from_str(scar_id)?;
        self.scars.remove(&scar);
        self.refresh_scar_penalties();
        Ok(())
    }

    pub fn set_temporary_modifier(&mut self, value: i32) {
        self.modifiers.temporary = value;
    }

    pub fn set_something_extra(&mut self, enabled: bool) {
        self.modifiers.something_extra = enabled;
    }

    /// Flip Something Extra. Returns the new value.
    pub fn toggle_something_extra(&mut self) -> bool {
        self.modifiers.something_extra = !self.modifiers.something_extra;
        self.modifiers.something_extra
    }

    /// Apply the state change produced by a computed roll.
    pub fn apply_delta(&mut self, delta: &StateDelta) {
        if delta.reset_temporary_modifiers {
            self.modifiers.take();
        }
    }

    /// Recompute every stat's scar penalty from the active scar set.
    fn refresh_scar_penalties(&mut self) {
        for score in self.stats.values_mut() {
            score.scar_penalty = 0;
        }
        for scar in &self.scars {
            if let Some(score) = self.stats.get_mut(&scar.stat()) {
                score.scar_penalty = SCAR_PENALTY;
            }
        }
    }
}

/// Wire shape used while loading; penalties are rebuilt on conversion.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CharacterStateData {
    #[serde(default)]
    id: CharacterId,
    name: String,
    #[serde(default)]
    kind: CharacterKind,
    #[serde(default)]
    stats: BTreeMap<Stat, StatScore>,
    #[serde(default)]
    scars: BTreeSet<Scar>,
    #[serde(default)]
    harm: Harm,
    #[serde(default)]
    modifiers: TemporaryModifiers,
}

impl From<CharacterStateData> for CharacterState {
    fn from(data: CharacterStateData) -> Self {
        let mut state = Self {
            id: data.id,
            name: data.name,
            kind: data.kind,
            stats: data.stats,
            scars: data.scars,
            harm: data.harm,
            modifiers: data.modifiers,
        };
        state.refresh_scar_penalties();
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_character() -> CharacterState {
        CharacterState::new("Dolemite", CharacterKind::Character)
            .with_stat(Stat::Might, 2)
            .with_stat(Stat::Smooth, 1)
    }

    #[test]
    fn new_character_has_all_stats() {
        let character = CharacterState::new("Foxy", CharacterKind::Character);
        assert_eq!(character.stats().count(), 5);
        assert_eq!(character.harm().value(), 0);
        assert!(character.modifiers().is_cleared());
    }

    #[test]
    fn scar_penalizes_bound_stat() {
        let mut character = test_character();
        assert_eq!(character.effective_value("might"), 2);

        assert_eq!(character.toggle_scar("broken"), Ok(true));
        assert_eq!(character.effective_value("might"), 1);
        assert_eq!(character.effective_value("smooth"), 1);

        assert_eq!(character.toggle_scar("broken"), Ok(false));
        assert_eq!(character.effective_value("might"), 2);
    }

    #[test]
    fn apply_and_remove_scar_are_idempotent() {
        let mut character = test_character();
        character.apply_scar("ugly").unwrap();
        character.apply_scar("ugly").unwrap();
        assert_eq!(character.stat(Stat::Smooth).unwrap().scar_penalty, -1);

        character.remove_scar("ugly").unwrap();
        character.remove_scar("ugly").unwrap();
        assert_eq!(character.stat(Stat::Smooth).unwrap().scar_penalty, 0);
        assert!(!character.has_scar(Scar::Ugly));
    }

    #[test]
    fn unknown_scar_leaves_state_untouched() {
        let mut character = test_character();
        let before = character.clone();
        assert!(matches!(
            character.toggle_scar("shifty"),
            Err(DomainError::UnknownScar { .. })
        ));
        assert!(character.apply_scar("shifty").is_err());
        assert!(character.remove_scar("shifty").is_err());
        assert_eq!(character, before);
    }

    #[test]
    fn unknown_stat_reads_as_zero() {
        let character = test_character();
        assert_eq!(character.effective_value("luck"), 0);

        let partial = test_character().without_stat(Stat::Soul);
        assert_eq!(partial.effective_value("soul"), 0);
        assert_eq!(partial.effective_stat(Stat::Soul), None);
    }

    #[test]
    fn harm_mutators_clamp() {
        let mut character = test_character();
        assert_eq!(character.apply_harm(100).value(), 8);
        assert_eq!(character.apply_harm(100).value(), 8);
        assert_eq!(character.heal_harm(3).value(), 5);
        assert_eq!(character.heal_harm(100).value(), 0);
        assert_eq!(character.heal_harm(100).value(), 0);
    }

    #[test]
    fn npc_harm_is_not_capped_at_display_max() {
        let mut npc = CharacterState::new("Goon", CharacterKind::Npc);
        assert_eq!(npc.kind().harm_display_max(), 5);
        assert_eq!(npc.apply_harm(7).value(), 7);
    }

    #[test]
    fn modifier_mutators() {
        let mut character = test_character();
        character.set_temporary_modifier(-2);
        assert!(character.toggle_something_extra());
        assert_eq!(character.modifiers(), TemporaryModifiers::new(-2, true));

        character.apply_delta(&StateDelta::reset_temporary_modifiers());
        assert!(character.modifiers().is_cleared());
    }

    #[test]
    fn loading_rebuilds_scar_penalties() {
        let json = r#"{
            "name": "Cleo",
            "stats": {
                "might": {"value": 1, "scarPenalty": -1},
                "soul": {"value": 2}
            },
            "scars": ["whitebread"],
            "harm": 11
        }"#;
        let character: CharacterState = serde_json::from_str(json).unwrap();
        assert_eq!(character.effective_value("might"), 1);
        assert_eq!(character.effective_value("soul"), 1);
        assert_eq!(character.harm().value(), 8);
        assert_eq!(character.kind(), CharacterKind::Character);
    }

    #[test]
    fn serialize_then_load_keeps_state() {
        let mut character = test_character().with_harm(3);
        character.apply_scar("gimped").unwrap();
        character.set_temporary_modifier(1);

        let json = serde_json::to_string(&character).unwrap();
        let loaded: CharacterState = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, character);
    }
}
