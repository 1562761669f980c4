use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use listing_moderation::config::ModerationConfig;
use listing_moderation::moderation::ModerationEngine;
use listing_moderation::moderation::submission::{ModerationReport, Submission};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries one JSON verdict per input line.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = ModerationConfig::from_env().context("invalid moderation configuration")?;
    let engine = ModerationEngine::with_builtin_rules(config).context("failed to compile rules")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        match_mode = ?engine.config().match_mode,
        spam_heuristics = engine.config().spam_heuristics,
        "Moderation engine ready, reading submissions from stdin"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let output = match serde_json::from_str::<Submission>(line) {
            Ok(submission) => {
                let report = ModerationReport::from(submission.moderate(&engine));
                serde_json::to_string(&report)?
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed submission");
                serde_json::json!({ "error": e.to_string() }).to_string()
            }
        };

        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    Ok(())
}
