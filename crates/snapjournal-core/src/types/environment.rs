//! Runtime environment classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

use super::photo_ref::is_loopback_http;

/// Where the journal is running.
///
/// Determines whether captures are written to the platform file system or
/// encoded inline, and which share path is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Environment {
    /// A page served to a browser. No file system, no native bridge.
    HostedWeb,
    /// A native shell with a working file system bridge.
    NativeMobile,
}

/// Raw observations the host shell makes at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSignals {
    /// Standard browser globals (document, window, navigator) are present.
    pub has_browser_globals: bool,

    /// Platform reported by the native bridge, or `None` if no bridge exists.
    pub native_bridge_platform: Option<String>,

    /// Origin the app is served from, if any.
    pub origin: Option<String>,
}

impl Environment {
    /// Classify the runtime from startup signals.
    ///
    /// Any hosted-web signal wins. Only a present bridge reporting a non-web
    /// platform, with no browser globals and no loopback or plain-HTTP origin,
    /// classifies as native.
    pub fn detect(signals: &EnvironmentSignals) -> Self {
        if signals.has_browser_globals {
            return Environment::HostedWeb;
        }

        let Some(platform) = signals.native_bridge_platform.as_deref() else {
            return Environment::HostedWeb;
        };

        if platform.trim().is_empty() || platform.eq_ignore_ascii_case("web") {
            return Environment::HostedWeb;
        }

        if signals.origin.as_deref().is_some_and(is_dev_origin) {
            return Environment::HostedWeb;
        }

        Environment::NativeMobile
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::HostedWeb => "hosted-web",
            Environment::NativeMobile => "native-mobile",
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Environment::NativeMobile)
    }
}

/// Loopback hosts and unencrypted HTTP mean a dev server or a plain web host.
fn is_dev_origin(origin: &str) -> bool {
    match Url::parse(origin) {
        Ok(url) => url.scheme() == "http" || is_loopback_http(&url),
        Err(_) => false,
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web" | "hosted-web" => Ok(Environment::HostedWeb),
            "native" | "native-mobile" => Ok(Environment::NativeMobile),
            other => Err(InvalidInputError::Other {
                message: format!("unknown environment '{}'", other),
            }
            .into()),
        }
    }
}
