//! Unified error types for the domain layer
//!
//! Rolls, scar toggles and move authoring all report failures through
//! [`DomainError`], so adapters never have to fall back to strings.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The stat key is not one of the character's stats
    #[error("Invalid stat: {stat}")]
    InvalidStat { stat: String },

    /// The scar id is not in the scar table
    #[error("Unknown scar: {scar}")]
    UnknownScar { scar: String },

    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Create an invalid stat error for a stat key that cannot be rolled.
    pub fn invalid_stat(stat: impl Into<String>) -> Self {
        Self::InvalidStat { stat: stat.into() }
    }

    /// Create an unknown scar error.
    pub fn unknown_scar(scar: impl Into<String>) -> Self {
        Self::UnknownScar { scar: scar.into() }
    }

    /// Creates a validation error for business rule violations.
    ///
    /// Use this when authored data breaks an invariant:
    /// - Success threshold not above the partial threshold
    /// - Item traits outside the known vocabulary
    /// - Asking a non-move item for its move definition
    ///
    /// # Example
    /// ```ignore
    /// if success <= partial {
    ///     return Err(DomainError::validation("success threshold must exceed partial"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Check if this error rejected a roll before any dice were thrown.
    pub fn is_invalid_stat(&self) -> bool {
        matches!(self, Self::InvalidStat { .. })
    }
}
