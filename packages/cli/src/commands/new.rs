use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use folio_store::PageSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Document to create
    pub output: PathBuf,

    /// Number of pages
    #[arg(short, long, default_value_t = 4)]
    pub pages: usize,

    /// Comma-separated page labels (defaults to "Page 1", "Page 2", ...)
    #[arg(short, long, value_delimiter = ',')]
    pub labels: Vec<String>,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

pub fn new(args: NewArgs, cwd: &Path) -> Result<()> {
    let output = cwd.join(&args.output);
    if output.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", output.display());
    }

    let pages = page_labels(args.pages, &args.labels);
    if pages.is_empty() {
        bail!("A document needs at least one page");
    }

    let count = pages.len();
    PageSet::labeled(pages).write(&output)?;
    println!(
        "{} Created {} ({} pages)",
        "✓".green(),
        output.display(),
        count
    );
    Ok(())
}

/// Explicit labels win; missing ones are numbered
fn page_labels(count: usize, labels: &[String]) -> Vec<String> {
    let count = count.max(labels.len());
    (0..count)
        .map(|i| {
            labels
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("Page {}", i + 1))
        })
        .collect()
}
