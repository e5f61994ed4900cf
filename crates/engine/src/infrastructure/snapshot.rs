//! JSON snapshot of a table's characters and their items.
//!
//! ```json
//! {
//!   "characters": [
//!     { "name": "Foxy", "stats": { "might": { "value": 2 } },
//!       "items": [ { "name": "Throw Down", "kind": "move", "system": { "stat": "might" } } ] }
//!   ],
//!   "items": [ { "name": "Mystery Van", "kind": "vehicle" } ]
//! }
//! ```
//!
//! Items nested under a character are owned by it. Top-level items keep
//! whatever `owner` they carry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use spirit77_domain::{CharacterId, CharacterState, Item, Vocabulary};

use crate::infrastructure::memory::{InMemoryCharacterRepo, InMemoryItemRepo};
use crate::infrastructure::ports::{CharacterRepo, ItemRepo, RepoError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotCharacter {
    #[serde(flatten)]
    pub character: CharacterState,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub characters: Vec<SnapshotCharacter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
}

impl Snapshot {
    pub fn parse(json: &str) -> Result<Self, RepoError> {
        serde_json::from_str(json).map_err(RepoError::serialization)
    }

    pub async fn load(path: &Path) -> Result<Self, RepoError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RepoError::storage("load_snapshot", format!("{}: {e}", path.display())))?;
        Self::parse(&json)
    }

    /// Write to a sibling `.tmp` file, then rename it over `path` so a
    /// failed write leaves the old snapshot in place.
    pub async fn write(&self, path: &Path) -> Result<(), RepoError> {
        let json = serde_json::to_string_pretty(self).map_err(RepoError::serialization)?;
        let tmp = temp_path(path)?;
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| RepoError::storage("write_snapshot", format!("{}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| RepoError::storage("write_snapshot", format!("{}: {e}", path.display())))
    }

    /// Flatten into in-memory repositories, stamping nested items with
    /// their owner.
    pub fn into_repos(self, vocabulary: &Vocabulary) -> (InMemoryCharacterRepo, InMemoryItemRepo) {
        let mut characters = Vec::with_capacity(self.characters.len());
        let mut items = self.items;

        for entry in self.characters {
            let owner = entry.character.id();
            items.extend(entry.items.into_iter().map(|item| item.owned_by(owner)));
            characters.push(entry.character);
        }

        for item in &items {
            if let Err(e) = item.validate(vocabulary) {
                tracing::warn!(item = %item.name, error = %e, "Item data outside the vocabulary");
            }
        }

        (
            InMemoryCharacterRepo::with_characters(characters),
            InMemoryItemRepo::with_items(items),
        )
    }

    /// Read the current contents of the repositories back into a snapshot.
    pub async fn capture(
        characters: &dyn CharacterRepo,
        items: &dyn ItemRepo,
    ) -> Result<Self, RepoError> {
        let mut entries: Vec<SnapshotCharacter> = characters
            .list()
            .await?
            .into_iter()
            .map(|character| SnapshotCharacter {
                character,
                items: Vec::new(),
            })
            .collect();
        let index: HashMap<CharacterId, usize> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.character.id(), i))
            .collect();

        let mut loose = Vec::new();
        for item in items.list().await? {
            match item.owner.and_then(|owner| index.get(&owner)) {
                Some(&i) => entries[i].items.push(item),
                None => loose.push(item),
            }
        }

        Ok(Self {
            characters: entries,
            items: loose,
        })
    }
}

fn temp_path(path: &Path) -> Result<PathBuf, RepoError> {
    let name = path.file_name().ok_or_else(|| {
        RepoError::storage("write_snapshot", format!("{}: not a file path", path.display()))
    })?;
    let mut tmp = name.to_os_string();
    tmp.push(".tmp");
    Ok(path.with_file_name(tmp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use spirit77_domain::{ItemKind, Scar, Stat};

    const PARTY: &str = r#"{
        "characters": [
            {
                "name": "Foxy",
                "stats": { "might": { "value": 2 }, "smooth": { "value": 1 } },
                "scars": ["broken"],
                "harm": 3,
                "items": [
                    { "name": "Throw Down", "kind": "move", "system": { "stat": "might", "modifier": 1 } }
                ]
            }
        ],
        "items": [ { "name": "Mystery Van", "kind": "vehicle", "system": { "traits": ["huge"] } } ]
    }"#;

    #[test]
    fn parses_nested_characters() {
        let snapshot = Snapshot::parse(PARTY).unwrap();
        let foxy = &snapshot.characters[0];
        assert_eq!(foxy.character.name(), "Foxy");
        assert!(foxy.character.has_scar(Scar::Broken));
        assert_eq!(foxy.character.effective_stat(Stat::Might), Some(1));
        assert_eq!(foxy.items.len(), 1);
        assert_eq!(snapshot.items.len(), 1);
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = Snapshot::parse("{ not json").unwrap_err();
        assert!(matches!(err, RepoError::Serialization(_)));
    }

    #[tokio::test]
    async fn repos_assign_owners_and_capture_round_trips() {
        let snapshot = Snapshot::parse(PARTY).unwrap();
        let foxy_id = snapshot.characters[0].character.id();
        let (characters, items) = snapshot.clone().into_repos(&Vocabulary::standard());

        let owned = items.list_owned_by(foxy_id).await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].kind, ItemKind::Move);

        let captured = Snapshot::capture(&characters, &items).await.unwrap();
        assert_eq!(captured.characters.len(), 1);
        assert_eq!(captured.characters[0].character, snapshot.characters[0].character);
        assert_eq!(captured.characters[0].items[0].owner, Some(foxy_id));
        assert_eq!(captured.items[0].name, "Mystery Van");
    }

    #[tokio::test]
    async fn write_replaces_the_file_without_leaving_a_temp_copy() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("spirit77-snapshot-{}.json", std::process::id()));
        tokio::fs::write(&path, "stale").await.unwrap();

        let snapshot = Snapshot::parse(PARTY).unwrap();
        snapshot.write(&path).await.unwrap();

        let reloaded = Snapshot::load(&path).await.unwrap();
        assert_eq!(reloaded.characters[0].character.id(), snapshot.characters[0].character.id());
        assert_eq!(reloaded.characters[0].items.len(), 1);
        assert_eq!(reloaded.items[0].name, "Mystery Van");
        assert!(!temp_path(&path).unwrap().exists());

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[test]
    fn temp_file_sits_next_to_the_target() {
        let tmp = temp_path(Path::new("/tables/party.json")).unwrap();
        assert_eq!(tmp, PathBuf::from("/tables/party.json.tmp"));
        assert!(temp_path(Path::new("/")).is_err());
    }
}
