//! snapjournal - command-line shell for a local photo journal.
//!
//! Each invocation resolves the data directory and environment, opens the
//! journal (which heals the persisted list), runs one lifecycle operation and
//! exits. Results go to stdout; logs go to stderr.

mod cli;
mod commands;
mod config;
mod journal;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;

/// Crates whose logs `-v` turns up. Dependencies stay at `warn`.
const JOURNAL_TARGETS: &[&str] = &["snapjournal", "snapjournal_file", "snapjournal_core"];

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    commands::handle(cli.global, cli.command).await
}

/// Filter directives for a `-v` count.
///
/// Quiet runs still report healed lists and swallowed platform failures,
/// which are logged at `warn`.
fn default_filter(verbosity: u8) -> String {
    let level = match verbosity {
        0 => return "warn".to_string(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let mut directives = vec!["warn".to_string()];
    directives.extend(
        JOURNAL_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, level)),
    );
    directives.join(",")
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
