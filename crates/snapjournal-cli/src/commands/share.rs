//! Share command implementation.

use anyhow::{Context, Result};
use clap::Args;

use snapjournal::ShareOutcome;
use snapjournal_file::{ExportShare, FileClipboard};

use crate::cli::GlobalArgs;
use crate::journal;
use crate::output;

use super::{find, parse_id};

#[derive(Args, Debug)]
pub struct ShareArgs {
    /// Photo id
    pub id: String,
}

pub async fn run(global: &GlobalArgs, args: ShareArgs) -> Result<()> {
    let id = parse_id(&args.id)?;
    let journal = journal::open(global, None).await?;
    let record = find(&journal, &id)?;

    let outcome = journal
        .controller
        .share(&record)
        .await
        .context("Failed to share photo")?;

    match outcome {
        ShareOutcome::Shared => {
            let log = ExportShare::new(journal.config.share_dir());
            let entries = log.entries().context("Failed to read share log")?;
            output::success(&format!("Shared photo {}", id));
            if let Some(entry) = entries.last() {
                if let Some(file) = &entry.file {
                    output::field("File", file);
                }
                if let Some(url) = &entry.url {
                    output::field("Url", url);
                }
            }
        }
        ShareOutcome::CopiedToClipboard => {
            let clipboard = FileClipboard::new(journal.config.clipboard_path());
            let text = clipboard
                .read_text()
                .context("Failed to read clipboard")?
                .unwrap_or_default();
            output::success("Sharing unavailable; title copied to clipboard");
            output::field("Clipboard", &text);
        }
    }

    Ok(())
}
