//! Reducer for the inventory state container
//!
//! Each request enters its pending phase synchronously and returns one
//! effect that calls the backend. The effect settles the request with a
//! fulfilled or rejected action. Successful reserves and allocations never
//! touch `items`; callers re-fetch to observe them.

use crate::constants::{
    ALLOCATE_FAILED_MESSAGE, ALLOCATE_PLACEHOLDER_QUANTITY, ALLOCATE_PLACEHOLDER_SKU,
    FETCH_FAILED_MESSAGE, RESERVE_FAILED_MESSAGE,
};
use crate::types::{
    AllocateChoice, AllocateInventoryPayload, AllocationOutcome, InventoryAction, InventoryState,
    ReserveInventoryPayload,
};
use std::sync::Arc;
use stockroom_client::{ApiError, InventoryApi};
use stockroom_core::{SmallVec, async_effect, effect::Effect, environment::Clock, reducer::Reducer, smallvec};

/// Environment dependencies for the inventory reducer
#[derive(Clone)]
pub struct InventoryEnvironment {
    /// Inventory backend
    pub api: Arc<dyn InventoryApi>,
    /// Clock for `last_updated`
    pub clock: Arc<dyn Clock>,
}

impl InventoryEnvironment {
    /// Creates a new `InventoryEnvironment`
    #[must_use]
    pub fn new(api: Arc<dyn InventoryApi>, clock: Arc<dyn Clock>) -> Self {
        Self { api, clock }
    }
}

/// Reducer for the inventory dashboard
#[derive(Clone, Debug, Default)]
pub struct InventoryReducer;

impl InventoryReducer {
    /// Creates a new `InventoryReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Enter the pending phase shared by all three requests
    fn begin_request(state: &mut InventoryState) {
        state.loading = true;
        state.error = None;
    }

    /// Settle a request as rejected
    fn reject(state: &mut InventoryState, message: String) {
        state.loading = false;
        state.error = Some(message);
    }

    fn fetch(env: &InventoryEnvironment) -> Effect<InventoryAction> {
        let api = Arc::clone(&env.api);
        async_effect! {
            Some(match api.list_inventory().await {
                Ok(items) => InventoryAction::InventoryFetched { items },
                Err(error) => InventoryAction::FetchFailed {
                    message: rejection_message(&error, FETCH_FAILED_MESSAGE),
                },
            })
        }
    }

    fn reserve(env: &InventoryEnvironment, payload: ReserveInventoryPayload) -> Effect<InventoryAction> {
        let api = Arc::clone(&env.api);
        async_effect! {
            let ReserveInventoryPayload { order_id, sku, quantity, .. } = payload;
            Some(match api.reserve_inventory(sku, quantity, order_id).await {
                Ok(item) => InventoryAction::InventoryReserved { item },
                Err(error) => InventoryAction::ReserveFailed {
                    message: rejection_message(&error, RESERVE_FAILED_MESSAGE),
                },
            })
        }
    }

    fn allocate(env: &InventoryEnvironment, payload: AllocateInventoryPayload) -> Effect<InventoryAction> {
        match payload.allocate_choice {
            AllocateChoice::No => async_effect! {
                Some(InventoryAction::InventoryAllocated {
                    outcome: AllocationOutcome::declined(),
                })
            },
            AllocateChoice::Yes => {
                let api = Arc::clone(&env.api);
                async_effect! {
                    let result = api
                        .allocate_inventory(
                            ALLOCATE_PLACEHOLDER_SKU.to_string(),
                            ALLOCATE_PLACEHOLDER_QUANTITY,
                            payload.order_id,
                        )
                        .await;
                    Some(match result {
                        Ok(item) => InventoryAction::InventoryAllocated {
                            outcome: AllocationOutcome::Allocated(item),
                        },
                        Err(error) => InventoryAction::AllocateFailed {
                            message: rejection_message(&error, ALLOCATE_FAILED_MESSAGE),
                        },
                    })
                }
            },
        }
    }
}

/// Message stored in state for a failed request
///
/// The error's display text, or `fallback` when that text is empty.
#[must_use]
pub fn rejection_message(error: &ApiError, fallback: &str) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

impl Reducer for InventoryReducer {
    type State = InventoryState;
    type Action = InventoryAction;
    type Environment = InventoryEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Requests ==========
            InventoryAction::FetchInventory => {
                tracing::debug!("Fetching inventory");
                Self::begin_request(state);
                smallvec![Self::fetch(env)]
            },

            InventoryAction::ReserveInventory(payload) => {
                tracing::debug!(
                    order_id = %payload.order_id,
                    sku = %payload.sku,
                    quantity = payload.quantity,
                    "Reserving inventory"
                );
                Self::begin_request(state);
                smallvec![Self::reserve(env, payload)]
            },

            InventoryAction::AllocateInventory(payload) => {
                tracing::debug!(
                    order_id = %payload.order_id,
                    choice = %payload.allocate_choice,
                    "Allocating inventory"
                );
                Self::begin_request(state);
                smallvec![Self::allocate(env, payload)]
            },

            // ========== Settlements ==========
            InventoryAction::InventoryFetched { items } => {
                tracing::debug!(count = items.len(), "Inventory fetched");
                state.loading = false;
                state.items = items;
                state.last_updated = Some(env.clock.now());
                SmallVec::new()
            },

            InventoryAction::InventoryReserved { item } => {
                tracing::debug!(echoed = item.is_some(), "Inventory reserved");
                state.loading = false;
                SmallVec::new()
            },

            InventoryAction::InventoryAllocated { outcome } => {
                tracing::debug!(declined = outcome.message().is_some(), "Inventory allocation settled");
                state.loading = false;
                SmallVec::new()
            },

            InventoryAction::FetchFailed { message }
            | InventoryAction::ReserveFailed { message }
            | InventoryAction::AllocateFailed { message } => {
                tracing::debug!(%message, "Inventory request rejected");
                Self::reject(state, message);
                SmallVec::new()
            },

            // ========== Direct updates ==========
            InventoryAction::ClearError => {
                state.error = None;
                SmallVec::new()
            },

            InventoryAction::SetLoading(loading) => {
                state.loading = loading;
                SmallVec::new()
            },
        }
    }
}
