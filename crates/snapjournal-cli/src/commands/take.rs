//! Take command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use snapjournal::{CaptureOptions, CaptureSource, ImageFormat};

use crate::cli::GlobalArgs;
use crate::journal;
use crate::output;

#[derive(Args, Debug)]
pub struct TakeArgs {
    /// Photo title
    #[arg(long, short = 't', default_value = "")]
    pub title: String,

    /// Image the capture service returns; without it the capture is dismissed
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Pick from the library instead of the camera
    #[arg(long)]
    pub library: bool,

    /// Encode as PNG instead of JPEG
    #[arg(long)]
    pub png: bool,

    /// Encoder quality (0-100)
    #[arg(long, default_value_t = 90, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub quality: u8,
}

pub async fn run(global: &GlobalArgs, args: TakeArgs) -> Result<()> {
    let journal = journal::open(global, args.file.as_deref()).await?;

    let options = CaptureOptions {
        format: if args.png {
            ImageFormat::Png
        } else {
            ImageFormat::Jpeg
        },
        quality: args.quality,
        source: if args.library {
            CaptureSource::Library
        } else {
            CaptureSource::Camera
        },
        ..CaptureOptions::default()
    };

    let record = journal
        .controller
        .take_photo(&args.title, &options)
        .await
        .context("Failed to store photo")?;

    match record {
        Some(record) => {
            println!("{}", record.id);
            output::success(&format!("Added photo {}", record.id));
        }
        None => output::warning("Capture cancelled; nothing added"),
    }

    Ok(())
}
