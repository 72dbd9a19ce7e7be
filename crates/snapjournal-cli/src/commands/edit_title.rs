//! Edit title command implementation.

use anyhow::{Result, bail};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::journal;
use crate::output;

use super::parse_id;

#[derive(Args, Debug)]
pub struct EditTitleArgs {
    /// Photo id
    pub id: String,

    /// New title
    pub title: String,

    /// Allow an empty title
    #[arg(long)]
    pub allow_empty: bool,
}

pub async fn run(global: &GlobalArgs, args: EditTitleArgs) -> Result<()> {
    let id = parse_id(&args.id)?;

    if args.title.trim().is_empty() && !args.allow_empty {
        bail!("Title is empty. Pass --allow-empty to clear it.");
    }

    let journal = journal::open(global, None).await?;

    if !journal.controller.edit_title(&id, &args.title).await {
        bail!("No photo with id {}", id);
    }

    output::success(&format!("Updated title of {}", id));
    Ok(())
}
