//! Transient feedback shown under the dashboard

use crate::constants::NOTIFICATION_DURATION;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Severity of a notification
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
    /// Something needs attention
    Warning,
    /// Neutral information
    #[default]
    Info,
}

impl NotificationKind {
    /// Lowercase label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message that disappears after its lifetime or when dismissed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Text shown to the user
    pub message: String,
    /// Severity
    pub kind: NotificationKind,
    /// When it was raised
    pub shown_at: DateTime<Utc>,
    /// How long it stays up
    pub duration: Duration,
}

impl Notification {
    /// Raise a notification with the default three-second lifetime
    #[must_use]
    pub fn new(message: impl Into<String>, kind: NotificationKind, shown_at: DateTime<Utc>) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at,
            duration: NOTIFICATION_DURATION,
        }
    }

    /// Override the lifetime
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether the lifetime has elapsed at `now`
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let Ok(elapsed) = (now - self.shown_at).to_std() else {
            return false;
        };
        elapsed >= self.duration
    }

    /// One-line rendering with the dismiss hint
    #[must_use]
    pub fn render(&self) -> String {
        format!("[{}] {}  (x to dismiss)", self.kind, self.message)
    }
}
