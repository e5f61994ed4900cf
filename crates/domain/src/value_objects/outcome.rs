//! Roll shapes and result tiers.
//!
//! Three-tier outcomes: under partial (failure), partial up to success
//! (partial), success and up (success). Default thresholds are 10 and 7.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DicePool;
use crate::error::DomainError;

pub const DEFAULT_SUCCESS_THRESHOLD: i32 = 10;
pub const DEFAULT_PARTIAL_THRESHOLD: i32 = 7;

/// Which dice-pool rule fired for a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RollTag {
    /// 2d6, nothing special
    Normal,
    /// High harm: 3d6 keep lowest 2
    SomethingLess,
    /// Player spent Something Extra: 3d6 keep highest 2
    SomethingExtra,
    /// Both applied and cancelled back to 2d6
    CancelOut,
}

impl RollTag {
    /// Pick the tag from the two independent conditions.
    pub fn select(lessened: bool, extra: bool) -> Self {
        match (lessened, extra) {
            (true, true) => Self::CancelOut,
            (true, false) => Self::SomethingLess,
            (false, true) => Self::SomethingExtra,
            (false, false) => Self::Normal,
        }
    }

    pub fn pool(&self) -> DicePool {
        match self {
            Self::Normal | Self::CancelOut => DicePool::standard(),
            Self::SomethingLess => DicePool::keep_lowest_two(),
            Self::SomethingExtra => DicePool::keep_highest_two(),
        }
    }

    pub fn description(&self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::SomethingLess => Some("Something Less"),
            Self::SomethingExtra => Some("Something Extra"),
            Self::CancelOut => Some("Extra & Less cancel"),
        }
    }
}

/// Roll outcome tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultTier {
    /// At or above the success threshold
    Success,
    /// At or above the partial threshold
    Partial,
    /// Below both
    Failure,
}

impl ResultTier {
    /// Determine the tier from a final total.
    pub fn from_total(total: i32, thresholds: Thresholds) -> Self {
        if total >= thresholds.success {
            Self::Success
        } else if total >= thresholds.partial {
            Self::Partial
        } else {
            Self::Failure
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Partial => "Partial",
            Self::Failure => "Failure",
        }
    }
}

impl fmt::Display for ResultTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Success and partial cut-offs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    pub success: i32,
    pub partial: i32,
}

impl Thresholds {
    /// Validated constructor for authored thresholds.
    pub fn new(success: i32, partial: i32) -> Result<Self, DomainError> {
        if success <= partial {
            return Err(DomainError::validation(format!(
                "success threshold ({success}) must exceed partial threshold ({partial})"
            )));
        }
        Ok(Self { success, partial })
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            success: DEFAULT_SUCCESS_THRESHOLD,
            partial: DEFAULT_PARTIAL_THRESHOLD,
        }
    }
}
