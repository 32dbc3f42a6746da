//! Command-line entry point: download every configured event once and exit.

use clap::Parser;
use race_results_dl::{Config, Event, ResultsFetcher, SourceMode};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "race-results-dl")]
#[command(about = "Download race results into anonymized CSV files", version)]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON array of events, replacing the configured list
    #[arg(short, long)]
    events: Option<PathBuf>,

    /// Replay cached responses instead of calling the API
    #[arg(long, conflicts_with = "live")]
    offline: bool,

    /// Call the API even if OFFLINE is set
    #[arg(long)]
    live: bool,

    /// Directory to place the per-race and combined CSV files under
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; real environment variables still apply
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.error_code(), "{e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run(args: Args) -> race_results_dl::Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.apply_env_with(|key| std::env::var(key).ok());

    if let Some(path) = &args.events {
        config.events = load_events(path)?;
    }
    if args.offline {
        config.source = SourceMode::Offline;
    } else if args.live {
        config.source = SourceMode::Live;
    }
    if let Some(dir) = &args.output_dir {
        config.output.rebase(dir);
    }

    if config.events.is_empty() {
        warn!("No events configured; the combined CSV will only contain a header");
    }

    let fetcher = ResultsFetcher::new(&config)?;
    let summary = fetcher.fetch_events().await?;

    info!(
        events = summary.events,
        races = summary.race_files.len(),
        skipped = summary.races_skipped,
        rows = summary.rows,
        "Done"
    );
    println!(
        "Wrote {} rows from {} races to {}",
        summary.rows,
        summary.race_files.len(),
        summary.combined_csv.display()
    );
    Ok(())
}

fn load_events(path: &Path) -> race_results_dl::Result<Vec<Event>> {
    let text = std::fs::read_to_string(path).map_err(|e| race_results_dl::Error::Config {
        message: format!("cannot read {}: {}", path.display(), e),
        key: Some("events".into()),
    })?;
    serde_json::from_str(&text).map_err(|e| race_results_dl::Error::Config {
        message: format!("invalid events file {}: {}", path.display(), e),
        key: Some("events".into()),
    })
}
