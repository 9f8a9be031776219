//! Endpoint configuration per environment mode

use crate::error::ApiError;
use reqwest::Url;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default origin used to resolve a relative production base path
pub const DEFAULT_ORIGIN: &str = "http://localhost";

/// Build environment the client targets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Local backend on a fixed host and port
    Development,
    /// Same-origin deployment behind a relative path
    Production,
}

impl Mode {
    /// Mode implied by the build profile: debug builds target development
    #[must_use]
    pub const fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }

    /// Lowercase name, as accepted by [`FromStr`]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::from_build()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown mode name
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown mode `{0}` (expected `development` or `production`)")]
pub struct ParseModeError(String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Where the backend lives and how long to wait for it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Absolute URL, or a path starting with `/` that is relative to `origin`
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Origin a relative `base_url` is resolved against
    pub origin: String,
}

impl ApiConfig {
    /// Fixed settings for each mode
    #[must_use]
    pub fn for_mode(mode: Mode) -> Self {
        let (base_url, timeout) = match mode {
            Mode::Development => ("http://localhost:8090/api", Duration::from_secs(5)),
            Mode::Production => ("/api", Duration::from_secs(10)),
        };

        Self {
            base_url: base_url.to_string(),
            timeout,
            origin: DEFAULT_ORIGIN.to_string(),
        }
    }

    /// Point a relative base path at a different origin
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Use an explicit base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolve the absolute base URL requests are built from
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] if neither the base URL nor the origin
    /// form a usable absolute URL.
    pub fn resolve(&self) -> Result<Url, ApiError> {
        let base = if self.base_url.starts_with('/') {
            Url::parse(&self.origin)
                .and_then(|origin| origin.join(&self.base_url))
                .map_err(|e| ApiError::Request(format!("invalid origin `{}`: {e}", self.origin)))?
        } else {
            Url::parse(&self.base_url).map_err(|e| {
                ApiError::Request(format!("invalid base URL `{}`: {e}", self.base_url))
            })?
        };

        if base.cannot_be_a_base() {
            return Err(ApiError::Request(format!(
                "base URL `{base}` cannot carry a path"
            )));
        }
        Ok(base)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::for_mode(Mode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_targets_local_backend() {
        let config = ApiConfig::for_mode(Mode::Development);
        assert_eq!(config.base_url, "http://localhost:8090/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.resolve().map(|url| url.to_string()).ok().as_deref(),
            Some("http://localhost:8090/api")
        );
    }

    #[test]
    fn production_resolves_against_origin() {
        let config = ApiConfig::for_mode(Mode::Production).with_origin("https://shop.example.com");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(
            config.resolve().map(|url| url.to_string()).ok().as_deref(),
            Some("https://shop.example.com/api")
        );
    }

    #[test]
    fn bad_origin_is_a_request_error() {
        let config = ApiConfig::for_mode(Mode::Production).with_origin("not a url");
        assert!(matches!(config.resolve(), Err(ApiError::Request(_))));
    }

    #[test]
    fn mode_parsing() {
        assert_eq!("production".parse::<Mode>(), Ok(Mode::Production));
        assert_eq!(" Dev ".parse::<Mode>(), Ok(Mode::Development));
        assert!("staging".parse::<Mode>().is_err());
        assert_eq!(Mode::Production.to_string(), "production");
    }
}
