//! Moves - authored actions with their own thresholds and outcome text.
//!
//! Move data comes from the host as loose JSON that may be missing whole
//! sections. [`normalize_move`] fills the gaps without touching anything the
//! author supplied, and [`MoveDefinition::from_raw`] turns the result into a
//! typed definition.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DomainError;
use crate::value_objects::{
    ResultTier, Stat, Thresholds, DEFAULT_PARTIAL_THRESHOLD, DEFAULT_SUCCESS_THRESHOLD,
};

/// Sheet grouping for a move. Has no effect on rolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveType {
    #[default]
    Basic,
    Role,
    Story,
}

impl MoveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Role => "role",
            Self::Story => "story",
        }
    }
}

impl FromStr for MoveType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "role" => Ok(Self::Role),
            "story" => Ok(Self::Story),
            _ => Err(DomainError::parse(format!("Unknown move type: {}", s))),
        }
    }
}

/// A tier that needs a minimum total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdOutcome {
    pub value: i32,
    pub text: String,
}

/// The failure tier; it has no threshold of its own.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FailureOutcome {
    pub text: String,
}

/// A fully-populated move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveDefinition {
    pub name: String,
    pub stat: Stat,
    pub modifier: i32,
    pub move_type: MoveType,
    pub success: ThresholdOutcome,
    pub partial: ThresholdOutcome,
    pub failure: FailureOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MoveDefinition {
    /// A move with default thresholds and empty outcome text.
    pub fn new(name: impl Into<String>, stat: Stat) -> Self {
        Self {
            name: name.into(),
            stat,
            modifier: 0,
            move_type: MoveType::Basic,
            success: ThresholdOutcome {
                value: DEFAULT_SUCCESS_THRESHOLD,
                text: String::new(),
            },
            partial: ThresholdOutcome {
                value: DEFAULT_PARTIAL_THRESHOLD,
                text: String::new(),
            },
            failure: FailureOutcome::default(),
            description: None,
        }
    }

    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn with_move_type(mut self, move_type: MoveType) -> Self {
        self.move_type = move_type;
        self
    }

    pub fn with_texts(
        mut self,
        success: impl Into<String>,
        partial: impl Into<String>,
        failure: impl Into<String>,
    ) -> Self {
        self.success.text = success.into();
        self.partial.text = partial.into();
        self.failure.text = failure.into();
        self
    }

    /// Set both thresholds. Rejects a success cut-off at or below partial.
    pub fn set_thresholds(&mut self, success: i32, partial: i32) -> Result<(), DomainError> {
        let thresholds = Thresholds::new(success, partial)?;
        self.success.value = thresholds.success;
        self.partial.value = thresholds.partial;
        Ok(())
    }

    pub fn with_thresholds(mut self, success: i32, partial: i32) -> Result<Self, DomainError> {
        self.set_thresholds(success, partial)?;
        Ok(self)
    }

    /// Thresholds as stored. Not re-validated on read.
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            success: self.success.value,
            partial: self.partial.value,
        }
    }

    /// Outcome text for the tier a roll landed on.
    pub fn result_text(&self, tier: ResultTier) -> &str {
        match tier {
            ResultTier::Success => &self.success.text,
            ResultTier::Partial => &self.partial.text,
            ResultTier::Failure => &self.failure.text,
        }
    }

    /// Build a move from raw host data.
    ///
    /// The data is normalized first, so this never fails: values that cannot
    /// be read as the expected type fall back to their defaults.
    pub fn from_raw(raw: &Value) -> Self {
        let normalized = normalize_move(raw);
        let stat = normalized
            .get("stat")
            .and_then(Value::as_str)
            .and_then(|s| Stat::from_str(s).ok())
            .unwrap_or_default();
        let move_type = normalized
            .get("moveType")
            .and_then(Value::as_str)
            .and_then(|s| MoveType::from_str(s).ok())
            .unwrap_or_default();

        Self {
            name: string_field(&normalized, "name"),
            stat,
            modifier: normalized.get("modifier").and_then(lenient_int).unwrap_or(0),
            move_type,
            success: threshold_outcome(&normalized, "success", DEFAULT_SUCCESS_THRESHOLD),
            partial: threshold_outcome(&normalized, "partial", DEFAULT_PARTIAL_THRESHOLD),
            failure: FailureOutcome {
                text: normalized
                    .get("failure")
                    .map(|f| string_field(f, "text"))
                    .unwrap_or_default(),
            },
            description: normalized
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

// =============================================================================
// Normalization
// =============================================================================

/// Fill in every missing or unusable move field with its default.
///
/// - `success`/`partial`: replaced with `{value, text: ""}` when absent or not
///   an object; otherwise only a missing `value` (10 / 7) or `text` is added
/// - `failure`: replaced with `{text: ""}` when absent or not an object;
///   otherwise a missing `text` is added
/// - `stat`: "might" when absent, empty, or not one of the five stats
/// - `moveType`: "basic" when absent or empty
/// - `modifier`: 0 when absent
///
/// Everything else is carried over untouched, including unknown fields and
/// supplied values of unexpected types. Normalizing twice changes nothing.
pub fn normalize_move(raw: &Value) -> Value {
    let mut data = match raw {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };

    ensure_outcome(&mut data, "success", Some(DEFAULT_SUCCESS_THRESHOLD));
    ensure_outcome(&mut data, "partial", Some(DEFAULT_PARTIAL_THRESHOLD));
    ensure_outcome(&mut data, "failure", None);

    let stat_valid = data
        .get("stat")
        .and_then(Value::as_str)
        .is_some_and(|s| Stat::from_str(s).is_ok());
    if !stat_valid {
        data.insert("stat".into(), Value::from(Stat::Might.as_str()));
    }

    if is_missing(data.get("moveType")) {
        data.insert("moveType".into(), Value::from(MoveType::Basic.as_str()));
    }

    if is_missing(data.get("modifier")) {
        data.insert("modifier".into(), Value::from(0));
    }

    Value::Object(data)
}

fn ensure_outcome(data: &mut Map<String, Value>, key: &str, default_value: Option<i32>) {
    match data.get_mut(key) {
        Some(Value::Object(outcome)) => {
            if let Some(value) = default_value {
                if outcome.get("value").map_or(true, Value::is_null) {
                    outcome.insert("value".into(), Value::from(value));
                }
            }
            if outcome.get("text").map_or(true, Value::is_null) {
                outcome.insert("text".into(), Value::from(""));
            }
        }
        _ => {
            let mut outcome = Map::new();
            if let Some(value) = default_value {
                outcome.insert("value".into(), Value::from(value));
            }
            outcome.insert("text".into(), Value::from(""));
            data.insert(key.into(), Value::Object(outcome));
        }
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Integers, integral floats and numeric strings all count.
fn lenient_int(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(|i| i32::try_from(i).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn threshold_outcome(data: &Value, key: &str, default_value: i32) -> ThresholdOutcome {
    let outcome = data.get(key);
    ThresholdOutcome {
        value: outcome
            .and_then(|o| o.get("value"))
            .and_then(lenient_int)
            .unwrap_or(default_value),
        text: outcome.map(|o| string_field(o, "text")).unwrap_or_default(),
    }
}
