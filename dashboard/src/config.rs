//! Configuration for the `stockroom` binary.
//!
//! The mode comes from the build profile and may be overridden with
//! `STOCKROOM_MODE`. Everything else is derived from the mode.

use std::env;
use stockroom_client::{ApiConfig, Mode, config::DEFAULT_ORIGIN};

/// Default `tracing` filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str =
    "stockroom=info,stockroom_dashboard=info,stockroom_client=info,stockroom_runtime=info";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Build environment the client targets
    pub mode: Mode,
    /// Backend endpoint and timeout
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// - `STOCKROOM_MODE`: `development` | `production` (default: build profile)
    /// - `STOCKROOM_ORIGIN`: origin a relative production path resolves against
    ///   (default: `http://localhost`)
    ///
    /// Unparseable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = lookup("STOCKROOM_MODE")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Mode::from_build);
        let origin = lookup("STOCKROOM_ORIGIN").unwrap_or_else(|| DEFAULT_ORIGIN.to_string());

        Self {
            mode,
            api: ApiConfig::for_mode(mode).with_origin(origin),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
