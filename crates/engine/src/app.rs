//! Application state and composition.

use std::str::FromStr;
use std::sync::Arc;

use spirit77_domain::{CharacterId, CharacterState, RollResolver, Stat};

use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::ports::{CharacterRepo, ClockPort, ItemRepo, RandomPort, RepoError};
use crate::use_cases::{
    AdjustHarm, CharacterUseCases, DescribeCharacter, ManageScars, RollError, RollItem, RollMove,
    RollResult, RollStat, RollUseCases, SetModifiers,
};

/// Main application state.
///
/// Holds the repositories and every use case wired against them.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub config: EngineConfig,
}

/// Container for the repository ports.
pub struct Repositories {
    pub character: Arc<dyn CharacterRepo>,
    pub item: Arc<dyn ItemRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub roll: RollUseCases,
    pub character: CharacterUseCases,
}

/// What to roll, as typed by a person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollTarget {
    Stat(Stat),
    Item(String),
}

impl RollTarget {
    /// Anything that reads as a stat key is a stat; everything else is an
    /// item name.
    pub fn parse(input: &str) -> Self {
        Stat::from_str(input)
            .map(Self::Stat)
            .unwrap_or_else(|_| Self::Item(input.trim().to_string()))
    }
}

impl App {
    pub fn new(
        config: EngineConfig,
        repositories: Repositories,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let resolver = RollResolver::new(config.rules);
        let characters = repositories.character.clone();

        let moves = Arc::new(RollMove::new(
            characters.clone(),
            repositories.item.clone(),
            random.clone(),
            clock.clone(),
            resolver,
        ));
        let roll = RollUseCases::new(
            Arc::new(RollStat::new(
                characters.clone(),
                random.clone(),
                clock.clone(),
                resolver,
            )),
            moves.clone(),
            Arc::new(RollItem::new(
                characters.clone(),
                repositories.item.clone(),
                moves,
                random,
                clock,
            )),
        );

        let character = CharacterUseCases::new(
            Arc::new(AdjustHarm::new(characters.clone(), config.rules)),
            Arc::new(ManageScars::new(characters.clone())),
            Arc::new(SetModifiers::new(characters.clone())),
            Arc::new(DescribeCharacter::new(characters, config.rules)),
        );

        Self {
            repositories,
            use_cases: UseCases { roll, character },
            config,
        }
    }

    pub async fn find_character(&self, name: &str) -> Result<CharacterState, RepoError> {
        self.repositories
            .character
            .find_by_name(name)
            .await?
            .ok_or_else(|| RepoError::not_found("Character", name))
    }

    pub async fn roll(
        &self,
        character_id: CharacterId,
        target: &RollTarget,
    ) -> Result<RollResult, RollError> {
        match target {
            RollTarget::Stat(stat) => self
                .use_cases
                .roll
                .stat
                .execute(character_id, stat.as_str())
                .await
                .map(RollResult::Resolved),
            RollTarget::Item(name) => {
                let item = self
                    .use_cases
                    .roll
                    .items
                    .find_owned_item(character_id, name)
                    .await?;
                self.use_cases.roll.items.execute(character_id, item.id).await
            }
        }
    }
}
