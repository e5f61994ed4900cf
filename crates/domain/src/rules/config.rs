//! Tunable rule constants.

use serde::{Deserialize, Serialize};

use crate::value_objects::{
    Harm, Thresholds, DEFAULT_PARTIAL_THRESHOLD, DEFAULT_SOMETHING_LESS_AT,
    DEFAULT_SUCCESS_THRESHOLD,
};

/// Rule constants injected into the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RulesConfig {
    /// Total needed for a success when the roll is not for a move
    pub success_threshold: i32,
    /// Total needed for a partial when the roll is not for a move
    pub partial_threshold: i32,
    /// Harm at which rolls become Something Less
    pub something_less_at: u8,
}

impl RulesConfig {
    pub fn default_thresholds(&self) -> Thresholds {
        Thresholds {
            success: self.success_threshold,
            partial: self.partial_threshold,
        }
    }

    /// Check the config is internally consistent.
    pub fn validate(&self) -> Result<(), crate::DomainError> {
        Thresholds::new(self.success_threshold, self.partial_threshold)?;
        if self.something_less_at > Harm::MAX {
            return Err(crate::DomainError::validation(format!(
                "something_less_at ({}) is above the harm track ({})",
                self.something_less_at,
                Harm::MAX
            )));
        }
        Ok(())
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            success_threshold: DEFAULT_SUCCESS_THRESHOLD,
            partial_threshold: DEFAULT_PARTIAL_THRESHOLD,
            something_less_at: DEFAULT_SOMETHING_LESS_AT,
        }
    }
}
