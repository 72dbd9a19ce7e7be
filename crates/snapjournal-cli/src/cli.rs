//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

use crate::commands::Command;

/// Local photo journal.
#[derive(Parser, Debug)]
#[command(name = "snapjournal")]
#[command(author, version = env!("SNAPJOURNAL_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Data directory (defaults to the platform data directory)
    #[arg(long, env = "SNAPJOURNAL_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Runtime environment; `auto` detects it from SNAPJOURNAL_* signals
    #[arg(
        long,
        value_enum,
        env = "SNAPJOURNAL_ENVIRONMENT",
        default_value_t = EnvironmentArg::Auto,
        global = true
    )]
    pub environment: EnvironmentArg,

    /// Upper bound on each platform call, in seconds
    #[arg(long, env = "SNAPJOURNAL_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub timeout_secs: u64,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentArg {
    /// Detect from startup signals
    Auto,
    /// Hosted web: photos are stored inline
    Web,
    /// Native: photos are written to the documents directory
    Native,
}
