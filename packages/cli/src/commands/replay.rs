//! Replay recorded interaction scripts.
//!
//! A script is a JSON array of steps fed to an [`EditSession`] in order.
//! Pointer steps are hit-tested against the configured grid, rebuilt after
//! every step so indices track the current page count.
//!
//! ```json
//! [
//!   { "step": "press", "at": { "x": 216, "y": 92 } },
//!   { "step": "move", "at": { "x": 30, "y": 92 } },
//!   { "step": "release", "at": { "x": 30, "y": 92 } },
//!   { "step": "key", "stroke": { "key": { "char": "z" }, "ctrl": true } },
//!   { "step": "command", "command": { "type": "rotate_page", "index": 0 } }
//! ]
//! ```

use super::open_session;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use folio_editor::{Command, EditSession, Effect, KeyStroke, PageLayout, PointerEvent};
use folio_store::DocumentStore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Document to edit
    pub input: PathBuf,

    /// JSON script of steps
    pub script: PathBuf,

    /// Write the result here instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Press at a point; the page under it (if any) is the hit
    Press { at: PointerEvent },
    Move { at: PointerEvent },
    Release { at: PointerEvent },
    /// Files dropped from outside, in drag-and-drop text form
    Drop { data: String, at: PointerEvent },
    Key { stroke: KeyStroke },
    Command { command: Command },
}

/// Outcome of a replay
#[derive(Debug, Default)]
pub struct ReplayReport {
    pub steps: usize,
    pub errors: Vec<String>,
}

pub fn replay(args: ReplayArgs, cwd: &Path, config: &Config) -> Result<()> {
    let input = cwd.join(&args.input);
    let script_path = cwd.join(&args.script);

    let script = fs::read_to_string(&script_path)
        .with_context(|| format!("Cannot read {}", script_path.display()))?;
    let steps: Vec<Step> = serde_json::from_str(&script)
        .with_context(|| format!("Invalid script {}", script_path.display()))?;

    let mut session = open_session(&input, config)?;
    let report = run_steps(&mut session, &steps, config);

    for error in &report.errors {
        println!("  {} {}", "✗".red(), error);
    }

    if session.store().is_open() {
        let output = args.output.as_ref().map(|path| cwd.join(path));
        session.save(output.as_deref())?;
    }

    println!(
        "{} Replayed {} steps ({} errors)",
        "✓".green(),
        report.steps,
        report.errors.len()
    );
    println!("  {}", session.store().labels().join(", "));
    Ok(())
}

/// Feed `steps` to `session`, collecting every error effect
pub fn run_steps<S: DocumentStore>(
    session: &mut EditSession<S>,
    steps: &[Step],
    config: &Config,
) -> ReplayReport {
    let mut report = ReplayReport::default();

    for step in steps {
        let layout = config.layout.rects(session.page_count());
        debug!("Replaying {:?}", step);

        match step {
            Step::Press { at } => {
                let hit = layout.page_at(at.position());
                session.pointer_press(hit, *at);
            }
            Step::Move { at } => session.pointer_move(*at, &layout),
            Step::Release { at } => session.pointer_release(*at),
            Step::Drop { data, at } => session.drop_files(data, *at, &layout),
            Step::Key { stroke } => session.key(*stroke),
            Step::Command { command } => {
                session.execute(command.clone());
            }
        }

        report.steps += 1;
        report
            .errors
            .extend(session.drain_effects().into_iter().filter_map(|effect| match effect {
                Effect::Error(message) => Some(message),
                _ => None,
            }));
    }

    report
}
