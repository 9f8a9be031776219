//! Fixed choices and messages shared by the form, validation and reducer

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Kind of stock operation a form submits
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Change a quantity by a signed delta
    #[default]
    Adjust,
    /// Hold stock against an order
    Reserve,
    /// Commit reserved stock to fulfillment
    Allocate,
    /// Release a quantity
    Cancel,
}

impl ActionKind {
    /// Every kind, in display order
    pub const ALL: [Self; 4] = [Self::Adjust, Self::Reserve, Self::Allocate, Self::Cancel];

    /// Wire and command-line name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adjust => "adjust",
            Self::Reserve => "reserve",
            Self::Allocate => "allocate",
            Self::Cancel => "cancel",
        }
    }

    /// Whether a submission of this kind must name an order
    #[must_use]
    pub const fn requires_order_id(self) -> bool {
        matches!(self, Self::Reserve | Self::Allocate)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown action kind
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown action `{0}` (expected adjust, reserve, allocate or cancel)")]
pub struct ParseActionKindError(String);

impl FromStr for ActionKind {
    type Err = ParseActionKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseActionKindError(s.to_string()))
    }
}

/// Category ids offered by the reserve form
pub const CATEGORY_IDS: [&str; 5] = ["101", "102", "103", "104", "105"];

/// Product ids offered by the add-inventory form
pub const PRODUCT_IDS: [&str; 5] = ["1", "2", "3", "4", "5"];

/// SKU sent when allocating, since the allocate form never collects one
pub const ALLOCATE_PLACEHOLDER_SKU: &str = "DEFAULT_SKU";

/// Quantity sent when allocating
pub const ALLOCATE_PLACEHOLDER_QUANTITY: u32 = 1;

/// Result message of an allocation the user declined
pub const ALLOCATION_DECLINED_MESSAGE: &str = "Allocation cancelled by user choice";

/// Stored when a failed fetch carries no message
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch inventory";

/// Stored when a failed reserve carries no message
pub const RESERVE_FAILED_MESSAGE: &str = "Failed to reserve inventory";

/// Stored when a failed allocate carries no message
pub const ALLOCATE_FAILED_MESSAGE: &str = "Failed to allocate inventory";

/// How long a notification stays up unless dismissed
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_kind_parsing() {
        assert_eq!("reserve".parse::<ActionKind>(), Ok(ActionKind::Reserve));
        assert_eq!(" ALLOCATE ".parse::<ActionKind>(), Ok(ActionKind::Allocate));
        assert!("ship".parse::<ActionKind>().is_err());
        assert_eq!(ActionKind::default(), ActionKind::Adjust);
    }

    #[test]
    fn only_reserve_and_allocate_need_an_order() {
        let needing: Vec<_> = ActionKind::ALL
            .into_iter()
            .filter(|kind| kind.requires_order_id())
            .collect();
        assert_eq!(needing, vec![ActionKind::Reserve, ActionKind::Allocate]);
    }
}
