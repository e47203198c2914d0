//! `auraframe edit --script FILE`

use std::path::PathBuf;

use af_app_state::{load_session, save_session, EditCommand, Editor};
use af_common::StudioConfig;
use af_history_store::HistoryStore;
use af_timeline::Clip;
use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct EditArgs {
    /// JSON array of edit commands
    #[arg(long)]
    script: PathBuf,

    /// Session to start from; created if it does not exist
    #[arg(long)]
    session: Option<PathBuf>,

    /// Where to write the result (defaults to --session)
    #[arg(long)]
    out: Option<PathBuf>,
}

pub fn run(args: EditArgs, config: &StudioConfig) -> anyhow::Result<()> {
    let store = HistoryStore::load_from(&config.history_path());
    let bin = store.media_bin(&config.editor);

    let mut editor = match &args.session {
        Some(path) if path.exists() => {
            let session = load_session(path)
                .with_context(|| format!("Failed to load session {}", path.display()))?;
            Editor::from_session(config.editor.clone(), session)?
        }
        _ => Editor::new(config.editor.clone()),
    };

    let json = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let script: Vec<EditCommand> = serde_json::from_str(&json)
        .with_context(|| format!("Invalid edit script {}", args.script.display()))?;

    let mut applied = 0;
    for (step, command) in script.iter().enumerate() {
        if editor.apply(command, &bin) {
            applied += 1;
        } else {
            warn!(step, op = command.name(), "Command had no effect");
        }
    }
    info!(applied, total = script.len(), "Script replayed");

    print_timeline(&editor);

    if let Some(out) = args.out.as_ref().or(args.session.as_ref()) {
        save_session(&editor.to_session(), out)
            .with_context(|| format!("Failed to save session {}", out.display()))?;
        println!("saved {}", out.display());
    }
    Ok(())
}

fn print_timeline(editor: &Editor) {
    let timeline = editor.timeline();
    println!(
        "duration {:.3}s  playhead {}  undo {}  redo {}",
        timeline.total_duration(),
        editor.playhead(),
        editor.undo_depth(),
        editor.redo_depth()
    );

    for (label, track) in [("video", timeline.video()), ("audio", timeline.audio())] {
        println!("{label} ({} clips, {:.3}s)", track.len(), track.duration());
        for (start, clip) in track.starts() {
            println!("  {}", describe(start, clip));
        }
    }
}

fn describe(start: f64, clip: &Clip) -> String {
    let mut line = format!(
        "{:<8} {:>8.3} +{:<8.3} vol {:.2}  {}",
        clip.id().to_string(),
        start,
        clip.duration(),
        clip.volume(),
        clip.name()
    );
    if !clip.effects().is_identity() {
        let fx = clip.effects().resolved();
        line.push_str(&format!(
            "  [blur {} gray {} bright {} contrast {} sat {}]",
            fx.blur, fx.grayscale, fx.brightness, fx.contrast, fx.saturate
        ));
    }
    line
}
