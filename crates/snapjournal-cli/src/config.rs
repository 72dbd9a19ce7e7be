//! Runtime configuration resolved from CLI arguments and the environment.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use snapjournal::{ControllerConfig, Environment, EnvironmentSignals, StoreConfig};

use crate::cli::{EnvironmentArg, GlobalArgs};

/// Signals read in `auto` mode.
const BROWSER_GLOBALS_VAR: &str = "SNAPJOURNAL_BROWSER_GLOBALS";
const BRIDGE_PLATFORM_VAR: &str = "SNAPJOURNAL_BRIDGE_PLATFORM";
const ORIGIN_VAR: &str = "SNAPJOURNAL_ORIGIN";

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub environment: Environment,
    pub store: StoreConfig,
    pub controller: ControllerConfig,
}

impl Config {
    pub fn resolve(args: &GlobalArgs) -> Result<Self> {
        let data_dir = match &args.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };

        std::fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

        Ok(Self {
            data_dir,
            environment: resolve_environment(args.environment),
            store: StoreConfig::default(),
            controller: ControllerConfig {
                collaborator_timeout: Duration::from_secs(args.timeout_secs.max(1)),
            },
        })
    }

    pub fn share_dir(&self) -> PathBuf {
        self.data_dir.join("shared")
    }

    pub fn clipboard_path(&self) -> PathBuf {
        self.data_dir.join("clipboard.txt")
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "snapjournal")
        .context("Could not determine data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

fn resolve_environment(arg: EnvironmentArg) -> Environment {
    match arg {
        EnvironmentArg::Web => Environment::HostedWeb,
        EnvironmentArg::Native => Environment::NativeMobile,
        EnvironmentArg::Auto => Environment::detect(&signals_from_env()),
    }
}

/// Read startup signals from the process environment.
pub fn signals_from_env() -> EnvironmentSignals {
    let flag = |name: &str| {
        std::env::var(name)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false)
    };
    let text = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

    EnvironmentSignals {
        has_browser_globals: flag(BROWSER_GLOBALS_VAR),
        native_bridge_platform: text(BRIDGE_PLATFORM_VAR),
        origin: text(ORIGIN_VAR),
    }
}
