//! Capture command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use snapjournal::{CapturedImage, ImageFormat};

use crate::cli::GlobalArgs;
use crate::journal;
use crate::output;

#[derive(Args, Debug)]
pub struct CaptureArgs {
    /// Image file to add
    #[arg(long)]
    pub file: PathBuf,

    /// Photo title
    #[arg(long, short = 't', default_value = "")]
    pub title: String,
}

pub async fn run(global: &GlobalArgs, args: CaptureArgs) -> Result<()> {
    let journal = journal::open(global, None).await?;

    let bytes = std::fs::read(&args.file).context("Failed to read image file")?;
    let format = args
        .file
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageFormat::from_extension)
        .unwrap_or_default();

    let record = journal
        .controller
        .capture(&args.title, CapturedImage::new(bytes, format))
        .await
        .context("Failed to store photo")?;

    // Output the new photo's id
    println!("{}", record.id);
    if record.is_inline() {
        output::success(&format!("Added photo {} (inline)", record.id));
    } else {
        output::success(&format!("Added photo {} ({})", record.id, record.storage_ref));
    }

    Ok(())
}
