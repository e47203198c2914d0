//! AuraFrame Studio command line
//!
//! Manages the local generation history and replays edit scripts against the
//! two-track timeline editor.

mod edit;
mod history;

use std::path::PathBuf;

use af_common::StudioConfig;
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// AuraFrame Studio - generation history and timeline editing
#[derive(Parser, Debug)]
#[command(name = "auraframe")]
#[command(about = "Generation history and timeline editing for AuraFrame Studio")]
#[command(version)]
struct Args {
    /// Config file (JSON). Missing file means defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// History file, overriding the config and the platform default
    #[arg(long, global = true)]
    history: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect or edit the generation history
    #[command(subcommand)]
    History(history::HistoryCommand),

    /// Replay an edit script against a timeline session
    Edit(edit::EditArgs),
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config = match &args.config {
        Some(path) => StudioConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => StudioConfig::default(),
    };
    if let Some(path) = args.history {
        config.history_path = Some(path);
    }
    debug!(history = %config.history_path().display(), "Configuration resolved");

    match args.command {
        Command::History(cmd) => history::run(cmd, &config),
        Command::Edit(edit_args) => edit::run(edit_args, &config),
    }
}
