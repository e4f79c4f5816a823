use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use slo_clock::slo::{RepoTriageConfig, summarize};
use slo_clock::timeline::parse_item;
use slo_clock::types::{LabelVocabulary, RepoId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: slo-clock <item.json> <owner/repo> [now-rfc3339]";

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slo_clock=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Evaluation failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let [path, repo, rest @ ..] = args.as_slice() else {
        return Err(USAGE.into());
    };
    let now = match rest {
        [] => Utc::now(),
        [now] => DateTime::parse_from_rfc3339(now)?.with_timezone(&Utc),
        _ => return Err(USAGE.into()),
    };
    let path = PathBuf::from(path);
    let repo: RepoId = repo.parse()?;

    let config = RepoTriageConfig::from_env()?;
    let payload = std::fs::read(&path)?;
    let item = parse_item(repo, &payload)?;
    tracing::info!(item = %item.item_ref(), events = item.timeline.len(), "Loaded item");

    let summary = summarize(&item, &config, &LabelVocabulary::default(), now)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
