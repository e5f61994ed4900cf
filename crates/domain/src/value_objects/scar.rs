//! Scars - permanent consequences that cost a point on one stat while active.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Stat;
use crate::error::DomainError;

/// Penalty an active scar imposes on its bound stat.
pub const SCAR_PENALTY: i32 = -1;

/// The fixed scar table. Each scar is bound to exactly one stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scar {
    Broken,
    Gimped,
    Punchy,
    Ugly,
    Whitebread,
}

impl Scar {
    pub const ALL: [Scar; 5] = [
        Self::Broken,
        Self::Gimped,
        Self::Punchy,
        Self::Ugly,
        Self::Whitebread,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Broken => "broken",
            Self::Gimped => "gimped",
            Self::Punchy => "punchy",
            Self::Ugly => "ugly",
            Self::Whitebread => "whitebread",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Broken => "Broken",
            Self::Gimped => "Gimped",
            Self::Punchy => "Punchy",
            Self::Ugly => "Ugly",
            Self::Whitebread => "Whitebread",
        }
    }

    /// The stat this scar penalizes.
    pub fn stat(&self) -> Stat {
        match self {
            Self::Broken => Stat::Might,
            Self::Gimped => Stat::Hustle,
            Self::Punchy => Stat::Brains,
            Self::Ugly => Stat::Smooth,
            Self::Whitebread => Stat::Soul,
        }
    }
}

impl fmt::Display for Scar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Scar {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "broken" => Ok(Self::Broken),
            "gimped" => Ok(Self::Gimped),
            "punchy" => Ok(Self::Punchy),
            "ugly" => Ok(Self::Ugly),
            "whitebread" => Ok(Self::Whitebread),
            _ => Err(DomainError::unknown_scar(s)),
        }
    }
}
