//! # Stockroom Testing
//!
//! Testing utilities and helpers for the stockroom dashboard.
//!
//! This crate provides:
//! - An in-memory [`MockInventoryApi`] with scripted failures and a call log
//! - A deterministic [`FixedClock`]
//! - The Given-When-Then [`ReducerTest`] harness
//! - proptest strategies for inventory data
//!
//! ## Example
//!
//! ```ignore
//! use stockroom_testing::{MockInventoryApi, test_clock};
//! use stockroom_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_fetch_flow() {
//!     let api = MockInventoryApi::with_items(helpers::sample_items());
//!     let store = Store::new(InventoryState::default(), InventoryReducer, env(api));
//!
//!     store.send(InventoryAction::FetchInventory).await?.wait().await;
//!
//!     let state = store.state(Clone::clone).await;
//!     assert_eq!(state.items.len(), 3);
//! }
//! ```

use chrono::{DateTime, Utc};
use stockroom_core::environment::Clock;

pub mod api_mocks;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use stockroom_testing::mocks::FixedClock;
    /// use stockroom_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Test helpers and utilities
pub mod helpers {
    use stockroom_client::InventoryItem;

    /// Three items across two orders, the first with quantities set
    #[must_use]
    pub fn sample_items() -> Vec<InventoryItem> {
        vec![
            InventoryItem::new("ORD-1", "SKU-1", "101").with_quantities(5, 2),
            InventoryItem::new("ORD-1", "SKU-2", "102"),
            InventoryItem::new("ORD-2", "SKU-1", "101").with_quantities(1, 0),
        ]
    }

    /// Route `tracing` output through the test harness
    ///
    /// Safe to call from every test; only the first call installs a subscriber.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "stockroom=debug".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;
    use stockroom_client::InventoryItem;

    /// Non-blank identifiers such as SKUs and order ids
    pub fn identifier() -> impl Strategy<Value = String> {
        "[A-Z][A-Z0-9-]{0,11}"
    }

    /// Arbitrary inventory items with bounded quantities
    pub fn inventory_item() -> impl Strategy<Value = InventoryItem> {
        (
            identifier(),
            identifier(),
            prop_oneof![Just("101"), Just("102"), Just("103"), Just("104"), Just("105")],
            0..10_000u64,
            0..10_000u64,
        )
            .prop_map(|(order_id, sku, category_id, reserved, allocated)| {
                InventoryItem::new(order_id, sku, category_id).with_quantities(reserved, allocated)
            })
    }

    /// Inventory lists of up to `max` items
    pub fn inventory_items(max: usize) -> impl Strategy<Value = Vec<InventoryItem>> {
        prop::collection::vec(inventory_item(), 0..=max)
    }
}

// Re-export commonly used items
pub use api_mocks::{ApiCall, MockInventoryApi, backend_failure, network_failure, server_failure};
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions, run_future_effect};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    proptest! {
        #[test]
        fn generated_items_are_well_formed(item in properties::inventory_item()) {
            prop_assert!(!item.sku.is_empty());
            prop_assert!(!item.order_id.is_empty());
            prop_assert_eq!(item.category_id.len(), 3);
        }
    }
}
