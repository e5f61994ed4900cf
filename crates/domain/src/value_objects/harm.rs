//! Harm track - accumulated damage on a character.
//!
//! Harm runs from 0 (healthy) to 8 (destroyed). Every mutation clamps into
//! that range, so no sequence of adjustments can leave the track.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Harm at which Something Less kicks in unless configured otherwise.
pub const DEFAULT_SOMETHING_LESS_AT: u8 = 4;

/// Clamped harm counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Harm(u8);

impl Harm {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 8;

    /// Create a harm value, clamping anything above the track.
    pub fn new(value: i32) -> Self {
        Self(value.clamp(Self::MIN as i32, Self::MAX as i32) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Add harm (negative amounts heal). Clamped to the track.
    pub fn apply(self, amount: i32) -> Self {
        Self::new((self.0 as i32).saturating_add(amount))
    }

    /// Remove harm (negative amounts hurt). Clamped to the track.
    pub fn heal(self, amount: i32) -> Self {
        Self::new((self.0 as i32).saturating_sub(amount))
    }

    /// Whether rolls at this harm are degraded to Something Less.
    pub fn is_lessened(&self, threshold: u8) -> bool {
        self.0 >= threshold
    }

    pub fn level(&self) -> HarmLevel {
        HarmLevel::from_value(self.0)
    }
}

impl fmt::Display for Harm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.level())
    }
}

// Stored data may hold out-of-range harm from older sheets; clamp on the way in.
impl<'de> Deserialize<'de> for Harm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        Ok(Self::new(raw.clamp(i32::MIN as i64, i32::MAX as i64) as i32))
    }
}

/// Named steps of the harm track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HarmLevel {
    Healthy,
    Bruised,
    Bloodied,
    BruisedAndBloodied,
    Broken,
    Down,
    Dying,
    Dead,
    Destroyed,
}

impl HarmLevel {
    pub fn from_value(value: u8) -> Self {
        match value {
            0 => Self::Healthy,
            1 => Self::Bruised,
            2 => Self::Bloodied,
            3 => Self::BruisedAndBloodied,
            4 => Self::Broken,
            5 => Self::Down,
            6 => Self::Dying,
            7 => Self::Dead,
            _ => Self::Destroyed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Bruised => "Bruised",
            Self::Bloodied => "Bloodied",
            Self::BruisedAndBloodied => "Bruised & Bloodied",
            Self::Broken => "Broken",
            Self::Down => "Down",
            Self::Dying => "Dying",
            Self::Dead => "Dead",
            Self::Destroyed => "Destroyed",
        }
    }
}

impl fmt::Display for HarmLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_clamps_at_max() {
        assert_eq!(Harm::new(8).apply(100).value(), 8);
        assert_eq!(Harm::new(6).apply(3).value(), 8);
        assert_eq!(Harm::new(2).apply(i32::MAX).value(), 8);
    }

    #[test]
    fn heal_clamps_at_zero() {
        assert_eq!(Harm::new(0).heal(100).value(), 0);
        assert_eq!(Harm::new(3).heal(5).value(), 0);
        assert_eq!(Harm::new(3).heal(i32::MIN).value(), 8);
    }

    #[test]
    fn negative_amounts_move_the_other_way() {
        assert_eq!(Harm::new(5).apply(-2).value(), 3);
        assert_eq!(Harm::new(5).heal(-2).value(), 7);
    }

    #[test]
    fn something_less_threshold() {
        assert!(!Harm::new(3).is_lessened(DEFAULT_SOMETHING_LESS_AT));
        assert!(Harm::new(4).is_lessened(DEFAULT_SOMETHING_LESS_AT));
        assert!(Harm::new(8).is_lessened(DEFAULT_SOMETHING_LESS_AT));
    }

    #[test]
    fn levels() {
        assert_eq!(Harm::new(0).level(), HarmLevel::Healthy);
        assert_eq!(Harm::new(3).level().label(), "Bruised & Bloodied");
        assert_eq!(Harm::new(4).level(), HarmLevel::Broken);
        assert_eq!(Harm::new(8).level(), HarmLevel::Destroyed);
    }

    #[test]
    fn deserialize_clamps_out_of_range() {
        let harm: Harm = serde_json::from_str("12").unwrap();
        assert_eq!(harm.value(), 8);
        let harm: Harm = serde_json::from_str("-3").unwrap();
        assert_eq!(harm.value(), 0);
        assert_eq!(serde_json::to_string(&Harm::new(5)).unwrap(), "5");
    }
}
