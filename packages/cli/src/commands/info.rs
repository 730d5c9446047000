use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_store::PageSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Document to inspect
    pub input: PathBuf,

    /// Print the page list as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn info(args: InfoArgs, cwd: &Path) -> Result<()> {
    let input = cwd.join(&args.input);
    let doc = PageSet::load(&input)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!(
        "{} ({} pages)",
        input.display().to_string().bright_white().bold(),
        doc.pages.len()
    );
    for (index, page) in doc.pages.iter().enumerate() {
        if page.rotation == 0 {
            println!("  {:>3}  {}", index, page.label);
        } else {
            println!(
                "  {:>3}  {} {}",
                index,
                page.label,
                format!("(rotated {}°)", page.rotation).dimmed()
            );
        }
    }
    Ok(())
}
