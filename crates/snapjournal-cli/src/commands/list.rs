//! List command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::cli::GlobalArgs;
use crate::journal;
use crate::output::{self, PhotoSummary};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print full records, including inline image data
    #[arg(long)]
    pub full: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(global: &GlobalArgs, args: ListArgs) -> Result<()> {
    let journal = journal::open(global, None).await?;
    let photos = journal.controller.store().snapshot();

    if photos.is_empty() {
        eprintln!("{}", "No photos yet.".dimmed());
        return Ok(());
    }

    for record in photos.iter() {
        match (args.full, args.pretty) {
            (true, true) => output::json_pretty(record)?,
            (true, false) => output::json(record)?,
            (false, true) => output::json_pretty(&PhotoSummary::from_record(record))?,
            (false, false) => output::json(&PhotoSummary::from_record(record))?,
        }
    }

    Ok(())
}
