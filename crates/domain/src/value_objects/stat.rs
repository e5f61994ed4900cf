//! Stat value object - the five stats every roll is made against.
//!
//! Provides type safety for stat references instead of passing around keys
//! like "might" or "soul".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Character stats used for rolls.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    /// Might - muscle, toughness, violence
    #[default]
    Might,
    /// Hustle - speed, reflexes, hands
    Hustle,
    /// Brains - smarts, tech, noticing things
    Brains,
    /// Smooth - charm, lies, cool under pressure
    Smooth,
    /// Soul - grit, groove, the funk within
    Soul,
}

impl Stat {
    /// Every stat, in sheet order.
    pub const ALL: [Stat; 5] = [
        Self::Might,
        Self::Hustle,
        Self::Brains,
        Self::Smooth,
        Self::Soul,
    ];

    /// Returns the lowercase key used in character data (e.g., "might").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Might => "might",
            Self::Hustle => "hustle",
            Self::Brains => "brains",
            Self::Smooth => "smooth",
            Self::Soul => "soul",
        }
    }

    /// Returns the display name of the stat (e.g., "Might").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Might => "Might",
            Self::Hustle => "Hustle",
            Self::Brains => "Brains",
            Self::Smooth => "Smooth",
            Self::Soul => "Soul",
        }
    }

    /// Returns the short sheet abbreviation (e.g., "MIG").
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Might => "MIG",
            Self::Hustle => "HUS",
            Self::Brains => "BRA",
            Self::Smooth => "SMO",
            Self::Soul => "SOU",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Stat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "might" => Ok(Self::Might),
            "hustle" => Ok(Self::Hustle),
            "brains" => Ok(Self::Brains),
            "smooth" => Ok(Self::Smooth),
            "soul" => Ok(Self::Soul),
            _ => Err(DomainError::invalid_stat(s)),
        }
    }
}

/// A stat as it sits on a character: the authored value plus the derived
/// scar penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatScore {
    /// Author-set base value
    pub value: i32,
    /// Derived; either 0 or -1. Recomputed whenever derived data is prepared.
    #[serde(default)]
    pub scar_penalty: i32,
}

impl StatScore {
    pub fn new(value: i32) -> Self {
        Self {
            value,
            scar_penalty: 0,
        }
    }

    /// Base value plus scar penalty. No clamping is applied beyond the
    /// bounds of `i32`.
    pub fn effective(&self) -> i32 {
        self.value.saturating_add(self.scar_penalty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_as_str() {
        assert_eq!(Stat::Might.as_str(), "might");
        assert_eq!(Stat::Hustle.as_str(), "hustle");
        assert_eq!(Stat::Brains.as_str(), "brains");
        assert_eq!(Stat::Smooth.as_str(), "smooth");
        assert_eq!(Stat::Soul.as_str(), "soul");
    }

    #[test]
    fn test_stat_from_str() {
        assert_eq!(Stat::from_str("might"), Ok(Stat::Might));
        assert_eq!(Stat::from_str("Soul"), Ok(Stat::Soul));
        assert_eq!(Stat::from_str(" brains "), Ok(Stat::Brains));
        assert_eq!(
            Stat::from_str("luck"),
            Err(DomainError::invalid_stat("luck"))
        );
    }

    #[test]
    fn test_stat_serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&Stat::Hustle).unwrap();
        assert_eq!(json, "\"hustle\"");
        let parsed: Stat = serde_json::from_str("\"smooth\"").unwrap();
        assert_eq!(parsed, Stat::Smooth);
    }

    #[test]
    fn test_effective_value_applies_penalty() {
        let score = StatScore {
            value: 2,
            scar_penalty: -1,
        };
        assert_eq!(score.effective(), 1);

        let negative = StatScore {
            value: -1,
            scar_penalty: -1,
        };
        assert_eq!(negative.effective(), -2);
    }

    #[test]
    fn test_effective_value_saturates_at_the_edges() {
        let floor = StatScore {
            value: i32::MIN,
            scar_penalty: -1,
        };
        assert_eq!(floor.effective(), i32::MIN);
        assert_eq!(StatScore::new(i32::MAX).effective(), i32::MAX);
    }

    #[test]
    fn test_abbreviations_are_unique() {
        let mut abbreviations: Vec<_> = Stat::ALL.iter().map(|s| s.abbreviation()).collect();
        abbreviations.sort();
        abbreviations.dedup();
        assert_eq!(abbreviations.len(), 5);
    }
}
