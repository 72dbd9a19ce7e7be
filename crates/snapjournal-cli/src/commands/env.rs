//! Env command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::GlobalArgs;
use crate::config::{Config, signals_from_env};
use crate::output;

#[derive(Args, Debug)]
pub struct EnvArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(global: &GlobalArgs, args: EnvArgs) -> Result<()> {
    let config = Config::resolve(global)?;
    let signals = signals_from_env();

    if args.json {
        return output::json(&serde_json::json!({
            "environment": config.environment,
            "data_dir": config.data_dir,
            "browser_globals": signals.has_browser_globals,
            "bridge_platform": signals.native_bridge_platform,
            "origin": signals.origin,
        }));
    }

    output::field("Environment", config.environment.as_str());
    output::field("Data directory", &config.data_dir.display().to_string());
    output::field(
        "Bridge platform",
        signals.native_bridge_platform.as_deref().unwrap_or("none"),
    );
    output::field("Origin", signals.origin.as_deref().unwrap_or("none"));

    Ok(())
}
