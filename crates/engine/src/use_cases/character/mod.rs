//! Character state use cases: harm, scars, temporary modifiers and the
//! derived sheet view.
//!
//! Unlike rolls, these are direct edits, so a failed save is an error.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use spirit77_domain::{
    derive_effective_data, CharacterId, CharacterState, DerivedState, Harm, HarmLevel,
    RulesConfig, TemporaryModifiers,
};

mod error;

pub use error::CharacterError;

use crate::infrastructure::ports::CharacterRepo;

/// Container for character use cases.
pub struct CharacterUseCases {
    pub harm: Arc<AdjustHarm>,
    pub scars: Arc<ManageScars>,
    pub modifiers: Arc<SetModifiers>,
    pub describe: Arc<DescribeCharacter>,
}

impl CharacterUseCases {
    pub fn new(
        harm: Arc<AdjustHarm>,
        scars: Arc<ManageScars>,
        modifiers: Arc<SetModifiers>,
        describe: Arc<DescribeCharacter>,
    ) -> Self {
        Self {
            harm,
            scars,
            modifiers,
            describe,
        }
    }
}

async fn load(
    characters: &dyn CharacterRepo,
    id: CharacterId,
) -> Result<CharacterState, CharacterError> {
    characters
        .get(id)
        .await?
        .ok_or(CharacterError::CharacterNotFound(id))
}

/// Harm after an adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarmReport {
    pub harm: Harm,
    pub level: HarmLevel,
    /// Whether the character's next roll is Something Less
    pub something_less: bool,
}

pub struct AdjustHarm {
    characters: Arc<dyn CharacterRepo>,
    rules: RulesConfig,
}

impl AdjustHarm {
    pub fn new(characters: Arc<dyn CharacterRepo>, rules: RulesConfig) -> Self {
        Self { characters, rules }
    }

    /// Add harm. Negative amounts heal; the track clamps at both ends.
    pub async fn apply(&self, id: CharacterId, amount: i32) -> Result<HarmReport, CharacterError> {
        self.adjust(id, |c| c.apply_harm(amount)).await
    }

    pub async fn heal(&self, id: CharacterId, amount: i32) -> Result<HarmReport, CharacterError> {
        self.adjust(id, |c| c.heal_harm(amount)).await
    }

    async fn adjust(
        &self,
        id: CharacterId,
        change: impl FnOnce(&mut CharacterState) -> Harm,
    ) -> Result<HarmReport, CharacterError> {
        let mut character = load(self.characters.as_ref(), id).await?;
        let before = character.harm();
        let harm = change(&mut character);
        self.characters.save(&character).await?;

        tracing::info!(
            character = %character.name(),
            before = before.value(),
            after = harm.value(),
            "Harm adjusted"
        );

        Ok(HarmReport {
            harm,
            level: harm.level(),
            something_less: harm.is_lessened(self.rules.something_less_at),
        })
    }
}

pub struct ManageScars {
    characters: Arc<dyn CharacterRepo>,
}

impl ManageScars {
    pub fn new(characters: Arc<dyn CharacterRepo>) -> Self {
        Self { characters }
    }

    /// Flip a scar. Returns whether it is now active.
    pub async fn toggle(&self, id: CharacterId, scar_key: &str) -> Result<bool, CharacterError> {
        let mut character = load(self.characters.as_ref(), id).await?;
        let active = character.toggle_scar(scar_key)?;
        self.characters.save(&character).await?;
        tracing::info!(character = %character.name(), scar = scar_key, active, "Scar toggled");
        Ok(active)
    }

    pub async fn apply(&self, id: CharacterId, scar_key: &str) -> Result<(), CharacterError> {
        let mut character = load(self.characters.as_ref(), id).await?;
        character.apply_scar(scar_key)?;
        self.characters.save(&character).await?;
        tracing::info!(character = %character.name(), scar = scar_key, "Scar applied");
        Ok(())
    }

    pub async fn remove(&self, id: CharacterId, scar_key: &str) -> Result<(), CharacterError> {
        let mut character = load(self.characters.as_ref(), id).await?;
        character.remove_scar(scar_key)?;
        self.characters.save(&character).await?;
        tracing::info!(character = %character.name(), scar = scar_key, "Scar removed");
        Ok(())
    }
}

pub struct SetModifiers {
    characters: Arc<dyn CharacterRepo>,
}

impl SetModifiers {
    pub fn new(characters: Arc<dyn CharacterRepo>) -> Self {
        Self { characters }
    }

    pub async fn set_temporary(
        &self,
        id: CharacterId,
        value: i32,
    ) -> Result<TemporaryModifiers, CharacterError> {
        let mut character = load(self.characters.as_ref(), id).await?;
        character.set_temporary_modifier(value);
        self.characters.save(&character).await?;
        tracing::debug!(character = %character.name(), value, "Temporary modifier set");
        Ok(character.modifiers())
    }

    /// Returns whether Something Extra is now on.
    pub async fn toggle_something_extra(&self, id: CharacterId) -> Result<bool, CharacterError> {
        let mut character = load(self.characters.as_ref(), id).await?;
        let enabled = character.toggle_something_extra();
        self.characters.save(&character).await?;
        tracing::debug!(character = %character.name(), enabled, "Something Extra toggled");
        Ok(enabled)
    }
}

/// Read-only sheet view.
pub struct DescribeCharacter {
    characters: Arc<dyn CharacterRepo>,
    rules: RulesConfig,
}

impl DescribeCharacter {
    pub fn new(characters: Arc<dyn CharacterRepo>, rules: RulesConfig) -> Self {
        Self { characters, rules }
    }

    pub async fn execute(&self, id: CharacterId) -> Result<DerivedState, CharacterError> {
        let character = load(self.characters.as_ref(), id).await?;
        Ok(derive_effective_data(&character, &self.rules))
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::always;
    use spirit77_domain::{CharacterKind, DomainError, Scar, Stat};

    use super::*;
    use crate::infrastructure::ports::{MockCharacterRepo, RepoError};

    fn cleo() -> CharacterState {
        CharacterState::new("Cleopatra", CharacterKind::Character).with_stat(Stat::Hustle, 2)
    }

    fn repo_returning(character: &CharacterState) -> MockCharacterRepo {
        let mut repo = MockCharacterRepo::new();
        let stored = character.clone();
        repo.expect_get()
            .returning(move |_| Ok(Some(stored.clone())));
        repo
    }

    #[tokio::test]
    async fn apply_harm_saves_and_reports_something_less() {
        let character = cleo().with_harm(2);
        let mut repo = repo_returning(&character);
        repo.expect_save()
            .withf(|saved| saved.harm().value() == 4)
            .times(1)
            .returning(|_| Ok(()));

        let use_case = AdjustHarm::new(Arc::new(repo), RulesConfig::default());
        let report = use_case.apply(character.id(), 2).await.unwrap();

        assert_eq!(report.harm.value(), 4);
        assert_eq!(report.level, HarmLevel::Broken);
        assert!(report.something_less);
    }

    #[tokio::test]
    async fn heal_clamps_at_zero() {
        let character = cleo().with_harm(1);
        let mut repo = repo_returning(&character);
        repo.expect_save()
            .withf(|saved| saved.harm().value() == 0)
            .returning(|_| Ok(()));

        let use_case = AdjustHarm::new(Arc::new(repo), RulesConfig::default());
        let report = use_case.heal(character.id(), 5).await.unwrap();
        assert_eq!(report.harm.value(), 0);
        assert!(!report.something_less);
    }

    #[tokio::test]
    async fn save_failure_surfaces_as_repo_error() {
        let character = cleo();
        let mut repo = repo_returning(&character);
        repo.expect_save()
            .with(always())
            .returning(|_| Err(RepoError::storage("save", "read-only")));

        let use_case = AdjustHarm::new(Arc::new(repo), RulesConfig::default());
        let err = use_case.apply(character.id(), 1).await.unwrap_err();
        assert!(matches!(err, CharacterError::Repo(_)));
    }

    #[tokio::test]
    async fn toggle_scar_activates_penalty() {
        let character = cleo();
        let mut repo = repo_returning(&character);
        repo.expect_save()
            .withf(|saved| {
                saved.has_scar(Scar::Gimped) && saved.effective_stat(Stat::Hustle) == Some(1)
            })
            .times(1)
            .returning(|_| Ok(()));

        let use_case = ManageScars::new(Arc::new(repo));
        assert!(use_case.toggle(character.id(), "gimped").await.unwrap());
    }

    #[tokio::test]
    async fn unknown_scar_is_rejected_before_saving() {
        let character = cleo();
        let repo = repo_returning(&character);

        let use_case = ManageScars::new(Arc::new(repo));
        let err = use_case.apply(character.id(), "groovy").await.unwrap_err();
        assert!(matches!(
            err,
            CharacterError::Domain(DomainError::UnknownScar { .. })
        ));
    }

    #[tokio::test]
    async fn remove_scar_clears_penalty() {
        let character = cleo().with_scar(Scar::Gimped);
        let mut repo = repo_returning(&character);
        repo.expect_save()
            .withf(|saved| saved.active_scars().count() == 0)
            .returning(|_| Ok(()));

        let use_case = ManageScars::new(Arc::new(repo));
        use_case.remove(character.id(), "gimped").await.unwrap();
    }

    #[tokio::test]
    async fn modifiers_are_saved() {
        let character = cleo();
        let mut repo = repo_returning(&character);
        repo.expect_save().times(2).returning(|_| Ok(()));

        let use_case = SetModifiers::new(Arc::new(repo));
        let modifiers = use_case.set_temporary(character.id(), -2).await.unwrap();
        assert_eq!(modifiers.temporary, -2);
        assert!(use_case.toggle_something_extra(character.id()).await.unwrap());
    }

    #[tokio::test]
    async fn describe_reports_missing_character() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get().returning(|_| Ok(None));

        let use_case = DescribeCharacter::new(Arc::new(repo), RulesConfig::default());
        let err = use_case.execute(CharacterId::new()).await.unwrap_err();
        assert!(matches!(err, CharacterError::CharacterNotFound(_)));
    }

    #[tokio::test]
    async fn describe_derives_the_sheet() {
        let character = cleo().with_scar(Scar::Gimped).with_harm(5);
        let use_case =
            DescribeCharacter::new(Arc::new(repo_returning(&character)), RulesConfig::default());
        let sheet = use_case.execute(character.id()).await.unwrap();
        assert_eq!(sheet.active_scars, vec![Scar::Gimped]);
        assert!(sheet.something_less);
    }
}
