//! Show command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::GlobalArgs;
use crate::journal;
use crate::output::{self, PhotoSummary};

use super::{find, parse_id};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Photo id
    pub id: String,
}

pub async fn run(global: &GlobalArgs, args: ShowArgs) -> Result<()> {
    let journal = journal::open(global, None).await?;
    let id = parse_id(&args.id)?;
    let record = find(&journal, &id)?;
    let summary = PhotoSummary::from_record(&record);

    output::field("Id", &summary.id);
    output::field("Title", &summary.title);
    output::field("Taken", summary.taken.as_deref().unwrap_or("unknown"));
    output::field("Storage", &summary.storage);
    output::field("Display", &summary.display);

    Ok(())
}
