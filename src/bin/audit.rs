//! Bracket integrity audit.
//! Run with: cargo run --bin bracket-audit -- --event 42
//!       or: cargo run --bin bracket-audit -- --file bracket.json
//! The backend is configured through BRACKET_API_URL, BRACKET_API_TIMEOUT_MS, etc.
//! Exit code: 0 clean, 1 issues found, 2 bracket could not be loaded.

use anyhow::Context;
use esports_bracket::{audit_bracket, ApiError, Bracket, BracketApi};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "usage: bracket-audit --event <event-id> | --file <bracket.json>";

/// Where to read the bracket from.
enum Source {
    Event(String),
    File(PathBuf),
}

fn parse_args() -> Result<Source, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    let file: Option<PathBuf> = args.opt_value_from_str("--file")?;
    if let Some(path) = file {
        return Ok(Source::File(path));
    }
    let event: String = args.value_from_str("--event")?;
    Ok(Source::Event(event))
}

async fn load(source: &Source) -> anyhow::Result<Bracket> {
    match source {
        Source::File(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
        }
        Source::Event(event_id) => {
            let api = BracketApi::from_env()?;
            log::info!("Fetching bracket for event {} from {}", event_id, api.config().base_url);
            Ok(api.get_bracket(event_id).await?)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let source = match parse_args() {
        Ok(source) => source,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    let bracket = match load(&source).await {
        Ok(bracket) => bracket,
        Err(e) => {
            match e.downcast_ref::<ApiError>() {
                Some(api_error) => log::error!("{}", api_error.user_message()),
                None => log::error!("{:#}", e),
            }
            return ExitCode::from(2);
        }
    };

    log::info!(
        "Auditing bracket {} ({:?}, {} teams, {} matches, {:?})",
        bracket.id,
        bracket.kind,
        bracket.teamcount,
        bracket.matches.len(),
        bracket.status
    );
    let issues = audit_bracket(&bracket);
    if issues.is_empty() {
        log::info!("No issues found");
        return ExitCode::SUCCESS;
    }
    for issue in &issues {
        log::warn!("{}", issue);
    }
    log::error!("{} issue(s) found", issues.len());
    ExitCode::from(1)
}
