//! Spirit77 Engine - command-line runner.

use std::sync::Arc;

use anyhow::Context;
use spirit77_domain::Vocabulary;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spirit77_engine::app::{App, Repositories};
use spirit77_engine::use_cases::RollResult;
use spirit77_engine::cli::{CliError, Invocation};
use spirit77_engine::infrastructure::{
    clock::{SystemClock, SystemRandom},
    config::{self, EngineConfig, DEFAULT_LOG_FILTER},
    snapshot::Snapshot,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = EngineConfig::from_env();

    let invocation = match Invocation::parse(std::env::args().skip(1), config.data_path.clone()) {
        Ok(invocation) => invocation,
        Err(CliError::Usage) => {
            eprintln!("{}", spirit77_engine::cli::USAGE);
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::debug!(path = %invocation.data_path.display(), "Loading snapshot");
    let snapshot = Snapshot::load(&invocation.data_path)
        .await
        .with_context(|| format!("loading {}", invocation.data_path.display()))?;
    let (characters, items) = snapshot.into_repos(&Vocabulary::standard());

    let app = App::new(
        config,
        Repositories {
            character: Arc::new(characters),
            item: Arc::new(items),
        },
        Arc::new(SystemRandom::new()),
        Arc::new(SystemClock::new()),
    );

    let character = app.find_character(&invocation.character).await?;

    let Some(target) = invocation.target.as_ref() else {
        let sheet = app.use_cases.character.describe.execute(character.id()).await?;
        println!("{}", serde_json::to_string_pretty(&sheet)?);
        return Ok(());
    };

    let result = app.roll(character.id(), target).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    match &result {
        RollResult::Resolved(record) => {
            println!("{}", record.outcome.breakdown());
            println!("{}", record.outcome.summary());
            if let Some(text) = record.result_text.as_deref().filter(|t| !t.is_empty()) {
                println!("{text}");
            }
        }
        RollResult::Formula {
            character_name,
            item_name,
            roll,
            ..
        } => println!("{character_name} rolls {item_name}: {}", roll.breakdown()),
        RollResult::Description {
            item_name, text, ..
        } => println!("{item_name}: {text}"),
    }

    if invocation.save {
        let updated = Snapshot::capture(
            app.repositories.character.as_ref(),
            app.repositories.item.as_ref(),
        )
        .await?;
        updated
            .write(&invocation.data_path)
            .await
            .with_context(|| format!("writing {}", invocation.data_path.display()))?;
    }

    Ok(())
}
