//! Domain types for the inventory dashboard
//!
//! [`InventoryState`] is the single state container. It changes only through
//! [`InventoryAction`]s reduced by [`crate::InventoryReducer`].

use crate::constants::ALLOCATION_DECLINED_MESSAGE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use stockroom_client::InventoryItem;
use thiserror::Error;

/// State of the inventory dashboard
///
/// Created once at startup and never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryState {
    /// Last fetched snapshot, in backend order
    pub items: Vec<InventoryItem>,
    /// Whether a request is in flight
    pub loading: bool,
    /// Message of the last failed request
    pub error: Option<String>,
    /// When the last fetch succeeded
    pub last_updated: Option<DateTime<Utc>>,
}

impl InventoryState {
    /// Creates an empty, idle state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            last_updated: None,
        }
    }

    /// Number of items in the snapshot
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Items held for one SKU, across all orders
    pub fn items_for_sku<'a>(&'a self, sku: &'a str) -> impl Iterator<Item = &'a InventoryItem> {
        self.items.iter().filter(move |item| item.sku == sku)
    }
}

/// Input of a reserve request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveInventoryPayload {
    /// Order to reserve against
    pub order_id: String,
    /// SKU to reserve
    pub sku: String,
    /// Category of the SKU
    pub category_id: String,
    /// Quantity to reserve
    pub quantity: u32,
}

/// Answer to "Allocate inventory?"
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocateChoice {
    /// Allocate through the backend
    Yes,
    /// Decline; no request is made
    #[default]
    No,
}

impl AllocateChoice {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl fmt::Display for AllocateChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Neither `yes` nor `no`
#[derive(Debug, Error, PartialEq, Eq)]
#[error("allocate choice must be `yes` or `no`, got `{0}`")]
pub struct ParseAllocateChoiceError(String);

impl FromStr for AllocateChoice {
    type Err = ParseAllocateChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" => Ok(Self::Yes),
            "no" | "n" => Ok(Self::No),
            _ => Err(ParseAllocateChoiceError(s.to_string())),
        }
    }
}

/// Input of an allocate request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocateInventoryPayload {
    /// Order to allocate for
    pub order_id: String,
    /// Whether to allocate at all
    pub allocate_choice: AllocateChoice,
}

/// What a settled allocation produced
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationOutcome {
    /// The backend accepted the allocation, echoing the item if it sent one
    Allocated(Option<InventoryItem>),
    /// The user declined; nothing was sent
    Declined {
        /// Informational message
        message: String,
    },
}

impl AllocationOutcome {
    /// The outcome of answering "no"
    #[must_use]
    pub fn declined() -> Self {
        Self::Declined {
            message: ALLOCATION_DECLINED_MESSAGE.to_string(),
        }
    }

    /// Informational message, if any
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Allocated(_) => None,
            Self::Declined { message } => Some(message),
        }
    }
}

/// Actions of the inventory state container
///
/// Requests (`FetchInventory`, `ReserveInventory`, `AllocateInventory`) enter
/// the pending phase. Each settles with exactly one fulfilled or rejected
/// action, produced by the request's effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryAction {
    // ========== Requests ==========
    /// Load the full inventory snapshot
    FetchInventory,
    /// Reserve stock against an order
    ReserveInventory(ReserveInventoryPayload),
    /// Allocate stock for an order
    AllocateInventory(AllocateInventoryPayload),

    // ========== Settlements ==========
    /// Fetch succeeded
    InventoryFetched {
        /// Items returned by the backend
        items: Vec<InventoryItem>,
    },
    /// Fetch failed
    FetchFailed {
        /// Rejection message
        message: String,
    },
    /// Reserve succeeded
    InventoryReserved {
        /// Item returned by the backend; `None` for a status-only answer
        item: Option<InventoryItem>,
    },
    /// Reserve failed
    ReserveFailed {
        /// Rejection message
        message: String,
    },
    /// Allocate succeeded or was declined
    InventoryAllocated {
        /// What happened
        outcome: AllocationOutcome,
    },
    /// Allocate failed
    AllocateFailed {
        /// Rejection message
        message: String,
    },

    // ========== Direct updates ==========
    /// Dismiss the stored error
    ClearError,
    /// Set the loading flag outside the request lifecycle
    SetLoading(bool),
}

impl InventoryAction {
    /// Whether this action settles a request
    #[must_use]
    pub const fn is_settlement(&self) -> bool {
        matches!(
            self,
            Self::InventoryFetched { .. }
                | Self::FetchFailed { .. }
                | Self::InventoryReserved { .. }
                | Self::ReserveFailed { .. }
                | Self::InventoryAllocated { .. }
                | Self::AllocateFailed { .. }
        )
    }

    /// Rejection message, for failed settlements
    #[must_use]
    pub fn rejection(&self) -> Option<&str> {
        match self {
            Self::FetchFailed { message }
            | Self::ReserveFailed { message }
            | Self::AllocateFailed { message } => Some(message),
            _ => None,
        }
    }
}
