use super::open_session;
use crate::config::Config;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use folio_editor::Modifiers;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct ReorderArgs {
    /// Document to reorder
    pub input: PathBuf,

    /// Comma-separated page indices to move
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub select: Vec<usize>,

    /// Insertion slot, measured against the current order
    #[arg(short, long)]
    pub to: usize,

    /// Write the result here instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn reorder(args: ReorderArgs, cwd: &Path, config: &Config) -> Result<()> {
    let input = cwd.join(&args.input);
    let mut session = open_session(&input, config)?;

    let count = session.page_count();
    if let Some(bad) = args.select.iter().find(|&&index| index >= count) {
        bail!("Page {} is out of range ({} pages)", bad, count);
    }
    if args.to > count {
        bail!("Insertion slot {} is out of range (0..={})", args.to, count);
    }

    for &index in &args.select {
        session.click(index, Modifiers::CTRL);
    }

    if !session.move_selected_to(args.to)? {
        println!("{} Nothing to move", "•".yellow());
        return Ok(());
    }

    let output = args.output.as_ref().map(|path| cwd.join(path));
    session.save(output.as_deref())?;
    info!("Reordered {:?} to slot {}", args.select, args.to);

    println!(
        "{} {}",
        "✓".green(),
        session.store().labels().join(", ")
    );
    Ok(())
}
