//! trainer-onboarding - command stream runner
//!
//! Reads JSON-lines commands from `COMMANDS_FILE` (or stdin), dispatches them
//! against an in-memory repository and writes one JSON result per command to
//! stdout. Domain events are published to the log on stderr.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trainer_onboarding::config::LogFormat;
use trainer_onboarding::handlers::{Command, CommandDispatcher, CommandOutcome};
use trainer_onboarding::publisher::{EventPublisher, LoggingEventPublisher};
use trainer_onboarding::repository::{
    InMemoryTrainerAccountRequestRepository, TrainerAccountRequestRepository,
};
use trainer_onboarding::{AppError, AppResult, Config};

/// Initialize tracing/logging
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trainer_onboarding=debug".into());

    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

async fn open_input(config: &Config) -> anyhow::Result<Box<dyn AsyncBufRead + Unpin + Send>> {
    match &config.commands_file {
        Some(path) => {
            tracing::info!("Reading commands from {}", path.display());
            let file = tokio::fs::File::open(path).await?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => {
            tracing::info!("Reading commands from stdin");
            Ok(Box::new(BufReader::new(tokio::io::stdin())))
        }
    }
}

/// Decode and run one input line. `None` for blank lines and `#` comments.
async fn run_line(
    dispatcher: &CommandDispatcher,
    line_number: usize,
    raw: &[u8],
) -> Option<AppResult<CommandOutcome>> {
    let line = match std::str::from_utf8(raw) {
        Ok(line) => line.trim(),
        Err(e) => {
            tracing::warn!(line = line_number, "Command is not valid UTF-8: {}", e);
            return Some(Err(AppError::InvalidRequest(format!(
                "line {} is not valid UTF-8: {}",
                line_number, e
            ))));
        }
    };
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    match serde_json::from_str::<Command>(line) {
        Ok(command) => Some(dispatcher.dispatch(command).await),
        Err(e) => {
            tracing::warn!(line = line_number, "Unreadable command: {}", e);
            Some(Err(AppError::InvalidRequest(e.to_string())))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(&config);

    tracing::info!(environment = %config.environment, "Starting trainer onboarding");

    let repository: Arc<dyn TrainerAccountRequestRepository> =
        Arc::new(InMemoryTrainerAccountRequestRepository::new());
    let publisher: Arc<dyn EventPublisher> = Arc::new(LoggingEventPublisher::new());
    let dispatcher = CommandDispatcher::new(repository, publisher);

    let mut input = open_input(&config).await?;
    let mut stdout = tokio::io::stdout();
    let mut raw = Vec::new();
    let mut line_number = 0usize;
    let mut failures = 0usize;

    loop {
        raw.clear();
        if input.read_until(b'\n', &mut raw).await? == 0 {
            break;
        }
        line_number += 1;

        let output = match run_line(&dispatcher, line_number, &raw).await {
            None => continue,
            Some(Ok(outcome)) => serde_json::to_value(&outcome)?,
            Some(Err(e)) => {
                failures += 1;
                serde_json::to_value(e.to_response())?
            }
        };

        let mut rendered = serde_json::to_vec(&output)?;
        rendered.push(b'\n');
        stdout.write_all(&rendered).await?;
    }

    stdout.flush().await?;
    tracing::info!(lines = line_number, failures, "Command stream finished");

    Ok(())
}
