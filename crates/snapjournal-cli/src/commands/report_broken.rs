//! Report-broken command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::GlobalArgs;
use crate::journal;
use crate::output;

use super::parse_id;

#[derive(Args, Debug)]
pub struct ReportBrokenArgs {
    /// Photo id
    pub id: String,
}

pub async fn run(global: &GlobalArgs, args: ReportBrokenArgs) -> Result<()> {
    let id = parse_id(&args.id)?;
    let journal = journal::open(global, None).await?;

    if journal.controller.report_display_failure(&id).await {
        output::success(&format!("Removed unresolvable photo {}", id));
    } else {
        output::warning(&format!("Photo {} was kept", id));
    }

    Ok(())
}
