//! Single-use roll modifiers.

use serde::{Deserialize, Serialize};

/// Modifiers that apply to the next roll only.
///
/// Both fields are cleared after any roll, whether or not they were set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporaryModifiers {
    /// Signed bonus or penalty added to the next total
    #[serde(default)]
    pub temporary: i32,
    /// Roll an extra die on the next roll and keep the best two
    #[serde(default)]
    pub something_extra: bool,
}

impl TemporaryModifiers {
    pub fn new(temporary: i32, something_extra: bool) -> Self {
        Self {
            temporary,
            something_extra,
        }
    }

    pub fn is_cleared(&self) -> bool {
        *self == Self::default()
    }

    /// Consume the modifiers, leaving the cleared defaults behind.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_clears() {
        let mut modifiers = TemporaryModifiers::new(-2, true);
        let taken = modifiers.take();
        assert_eq!(taken, TemporaryModifiers::new(-2, true));
        assert!(modifiers.is_cleared());
    }

    #[test]
    fn missing_fields_default() {
        let modifiers: TemporaryModifiers = serde_json::from_str("{}").unwrap();
        assert!(modifiers.is_cleared());

        let modifiers: TemporaryModifiers =
            serde_json::from_str(r#"{"somethingExtra": true}"#).unwrap();
        assert_eq!(modifiers, TemporaryModifiers::new(0, true));
    }
}
