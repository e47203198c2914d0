//! `auraframe history ...`

use af_common::StudioConfig;
use af_history_store::{HistoryFilter, HistoryItemKind, HistoryStore, NewHistoryItem};
use anyhow::Context;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List items, most recent first
    List {
        /// Only show one kind (image, video, audio, text)
        #[arg(long)]
        kind: Option<HistoryItemKind>,
    },

    /// Record a generated artifact
    Add {
        #[arg(long)]
        kind: HistoryItemKind,

        /// Prompt that produced the artifact
        #[arg(long)]
        prompt: String,

        /// Media URL/path, or the text for text items
        #[arg(long)]
        data: String,

        /// Media duration in seconds (video/audio)
        #[arg(long)]
        duration: Option<f64>,
    },

    /// Delete one item by id
    Remove { id: u64 },

    /// Delete every item
    Clear,
}

pub fn run(command: HistoryCommand, config: &StudioConfig) -> anyhow::Result<()> {
    let mut store = HistoryStore::load_from(&config.history_path());

    match command {
        HistoryCommand::List { kind } => {
            let filter = kind.map_or(HistoryFilter::All, HistoryFilter::Kind);
            let mut shown = 0;
            for item in store.filtered(filter) {
                println!(
                    "{:>15}  {}  {:<5}  {}",
                    item.id, item.timestamp, item.kind, item.prompt
                );
                shown += 1;
            }
            if shown == 0 {
                println!("(no history items)");
            }
            return Ok(());
        }
        HistoryCommand::Add {
            kind,
            prompt,
            data,
            duration,
        } => {
            let metadata = duration.map(|d| serde_json::json!({ "duration": d }));
            let item = store.add(NewHistoryItem {
                kind,
                prompt,
                data,
                metadata,
            });
            println!("{}", item.id);
        }
        HistoryCommand::Remove { id } => {
            store.remove(id)?;
        }
        HistoryCommand::Clear => store.clear(),
    }

    store
        .save()
        .with_context(|| format!("Failed to save history to {}", store.path().display()))
}
