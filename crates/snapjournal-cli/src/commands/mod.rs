//! Subcommand implementations.

mod capture;
mod delete;
mod edit_title;
mod env;
mod list;
mod report_broken;
mod share;
mod show;
mod take;

use anyhow::{Context, Result};
use clap::Subcommand;

use snapjournal::{PhotoId, PhotoRecord};

use crate::cli::GlobalArgs;
use crate::journal::Journal;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List photos, newest first
    List(list::ListArgs),

    /// Show a single photo
    Show(show::ShowArgs),

    /// Add a photo from an image file
    Capture(capture::CaptureArgs),

    /// Take a photo through the capture service
    Take(take::TakeArgs),

    /// Change a photo's title
    EditTitle(edit_title::EditTitleArgs),

    /// Delete a photo and its stored image
    Delete(delete::DeleteArgs),

    /// Share a photo
    Share(share::ShareArgs),

    /// Report that a photo's image failed to display
    ReportBroken(report_broken::ReportBrokenArgs),

    /// Show the detected runtime environment
    Env(env::EnvArgs),
}

pub async fn handle(global: GlobalArgs, command: Command) -> Result<()> {
    match command {
        Command::List(args) => list::run(&global, args).await,
        Command::Show(args) => show::run(&global, args).await,
        Command::Capture(args) => capture::run(&global, args).await,
        Command::Take(args) => take::run(&global, args).await,
        Command::EditTitle(args) => edit_title::run(&global, args).await,
        Command::Delete(args) => delete::run(&global, args).await,
        Command::Share(args) => share::run(&global, args).await,
        Command::ReportBroken(args) => report_broken::run(&global, args).await,
        Command::Env(args) => env::run(&global, args).await,
    }
}

/// Parse a photo id argument.
fn parse_id(id: &str) -> Result<PhotoId> {
    PhotoId::new(id).context("Invalid photo id")
}

/// Look up a photo that must exist.
fn find(journal: &Journal, id: &PhotoId) -> Result<PhotoRecord> {
    journal
        .controller
        .store()
        .get(id)
        .with_context(|| format!("No photo with id {}", id))
}
