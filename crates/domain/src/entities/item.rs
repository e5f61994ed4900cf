//! Item entity - moves, gear, thangs, vehicles and xtech owned by a character.
//!
//! The system-specific fields of an item stay as the raw JSON the host
//! stores. Typed views (a move definition, a trait list) are read out of it
//! on demand.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::MoveDefinition;
use crate::error::DomainError;
use crate::ids::{CharacterId, ItemId};
use crate::rules::Vocabulary;

/// Kind of item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Move,
    Gear,
    Thang,
    Vehicle,
    Xtech,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Move => write!(f, "move"),
            Self::Gear => write!(f, "gear"),
            Self::Thang => write!(f, "thang"),
            Self::Vehicle => write!(f, "vehicle"),
            Self::Xtech => write!(f, "xtech"),
        }
    }
}

/// An item as the host stores it.
///
/// # Simple Data Struct
///
/// Any combination of values is valid; the typed accessors decide how much of
/// `system` they can use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub id: ItemId,
    #[serde(default)]
    pub owner: Option<CharacterId>,
    pub name: String,
    pub kind: ItemKind,
    /// System-specific fields, as stored by the host
    #[serde(default)]
    pub system: Value,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(),
            owner: None,
            name: name.into(),
            kind,
            system: Value::Object(Default::default()),
        }
    }

    pub fn owned_by(mut self, owner: CharacterId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_system(mut self, system: Value) -> Self {
        self.system = system;
        self
    }

    /// Read this item as a move. The item name wins over any name in the
    /// system data.
    pub fn move_definition(&self) -> Result<MoveDefinition, DomainError> {
        if self.kind != ItemKind::Move {
            return Err(DomainError::validation(format!(
                "{} is a {} item, not a move",
                self.name, self.kind
            )));
        }
        let mut definition = MoveDefinition::from_raw(&self.system);
        definition.name = self.name.clone();
        Ok(definition)
    }

    /// `system.rollFormula`, when it is a non-blank string.
    pub fn roll_formula(&self) -> Option<&str> {
        self.system
            .get("rollFormula")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|f| !f.is_empty())
    }

    /// `system.description`, or empty.
    pub fn description(&self) -> &str {
        self.system
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Check the item's traits and its type key against the vocabulary.
    ///
    /// Gear is checked on `range`, thangs on `thangType` and vehicles on
    /// `vehicleType`. A missing or blank key passes.
    pub fn validate(&self, vocabulary: &Vocabulary) -> Result<(), DomainError> {
        self.validate_traits(vocabulary)?;

        let (field, check): (&str, fn(&Vocabulary, &str) -> bool) = match self.kind {
            ItemKind::Gear => ("range", Vocabulary::is_weapon_range),
            ItemKind::Thang => ("thangType", Vocabulary::is_thang_type),
            ItemKind::Vehicle => ("vehicleType", Vocabulary::is_vehicle_type),
            ItemKind::Move | ItemKind::Xtech => return Ok(()),
        };
        match self.system.get(field).and_then(Value::as_str) {
            Some(key) if !key.is_empty() && !check(vocabulary, key) => {
                Err(DomainError::validation(format!(
                    "Unknown {} '{}' on {}",
                    field, key, self.name
                )))
            }
            _ => Ok(()),
        }
    }

    /// Trait keys listed under `system.traits`. Non-string entries are skipped.
    pub fn traits(&self) -> Vec<&str> {
        self.system
            .get("traits")
            .and_then(Value::as_array)
            .map(|traits| traits.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Check every listed trait against the vocabulary for this item kind.
    ///
    /// Vehicles use vehicle traits. Gear and xtech use weapon traits, since
    /// that is where weapons live. Moves and thangs carry no traits.
    pub fn validate_traits(&self, vocabulary: &Vocabulary) -> Result<(), DomainError> {
        let traits = self.traits();
        let check: fn(&Vocabulary, &str) -> bool = match self.kind {
            ItemKind::Vehicle => Vocabulary::is_vehicle_trait,
            ItemKind::Gear | ItemKind::Xtech => Vocabulary::is_weapon_trait,
            ItemKind::Move | ItemKind::Thang => {
                if traits.is_empty() {
                    return Ok(());
                }
                return Err(DomainError::validation(format!(
                    "{} items do not take traits",
                    self.kind
                )));
            }
        };

        let unknown: Vec<&str> = traits
            .into_iter()
            .filter(|t| !check(vocabulary, t))
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(format!(
                "Unknown {} traits on {}: {}",
                self.kind,
                self.name,
                unknown.join(", ")
            )))
        }
    }
}
