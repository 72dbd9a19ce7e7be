//! Delete command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::GlobalArgs;
use crate::journal;
use crate::output;

use super::parse_id;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Photo id
    pub id: String,
}

pub async fn run(global: &GlobalArgs, args: DeleteArgs) -> Result<()> {
    let id = parse_id(&args.id)?;
    let journal = journal::open(global, None).await?;

    if journal.controller.delete_by_id(&id).await {
        output::success(&format!("Deleted photo {}", id));
    } else {
        output::warning(&format!("No photo with id {}; nothing to delete", id));
    }

    Ok(())
}
