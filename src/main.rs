//! pagectl - Entry Point

use clap::Parser;
use pagectl::driver::ListDriver;
use pagectl::model::AppError;
use pagectl::script::{self, ScriptOptions};
use pagectl::source::{load_dataset, MemorySource};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// pagectl - drive a paginated, searchable list over a JSON dataset
#[derive(Parser, Debug)]
#[command(name = "pagectl")]
#[command(version)]
#[command(
    about = "Drive a paginated, searchable list over a JSON dataset",
    long_about = "Reads commands from stdin, one per line: search <text>, more, refresh, \
                  retry, show, wait, select <index>, quit. Prints a status line after each."
)]
pub struct Args {
    /// JSON file holding an array of records (or {"items": [...]})
    pub dataset: PathBuf,

    /// Items per page
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Search debounce in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Fixed filter sent with every request (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Leave totals out of responses so pages are inferred
    #[arg(long)]
    pub omit_totals: bool,

    /// Simulated backend latency per fetch in milliseconds
    #[arg(long, default_value = "0")]
    pub latency_ms: u64,

    /// Print items after each status line
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse a `key=value` filter argument.
fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got {raw:?}")),
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = pagectl::config::load_config_with_precedence(args.config.clone())?;
        let merged = pagectl::config::merge_config(config_file);
        let with_env = pagectl::config::apply_env_overrides(merged);
        pagectl::config::apply_cli_overrides(
            with_env,
            args.page_size,
            args.debounce_ms,
            args.filters.clone(),
        )
    };

    pagectl::logging::init(&config.log_file_path, &config.log_level)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let records = load_dataset(&args.dataset)?;
    info!(path = %args.dataset.display(), records = records.len(), "dataset loaded");

    let source = MemorySource::new(records)
        .omit_totals(args.omit_totals)
        .with_latency(Duration::from_millis(args.latency_ms));

    let mut driver = ListDriver::<Value>::spawn(Arc::new(source), config.controller_config())?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    script::run(
        &mut driver,
        stdin.lock(),
        stdout.lock(),
        ScriptOptions {
            verbose: args.verbose,
        },
    )
}
