//! State container flows through the real `Store`

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use stockroom_client::InventoryItem;
use stockroom_core::environment::SystemClock;
use stockroom_dashboard::{
    AllocateChoice, AllocateInventoryPayload, AllocationOutcome, InventoryAction,
    InventoryEnvironment, InventoryReducer, InventoryState, InventoryStore,
    ReserveInventoryPayload,
};
use stockroom_runtime::Store;
use stockroom_testing::helpers::{init_test_tracing, sample_items};
use stockroom_testing::{ApiCall, MockInventoryApi, backend_failure, network_failure, server_failure};

const SETTLE: Duration = Duration::from_secs(2);

fn store_with(api: &MockInventoryApi) -> InventoryStore {
    init_test_tracing();
    let env = InventoryEnvironment::new(Arc::new(api.clone()), Arc::new(SystemClock));
    Store::new(InventoryState::new(), InventoryReducer::new(), env)
}

async fn settle(store: &InventoryStore, action: InventoryAction) -> InventoryState {
    let mut handle = store.send(action).await.unwrap();
    handle.wait_with_timeout(SETTLE).await.unwrap();
    store.state(Clone::clone).await
}

fn reserve_payload() -> ReserveInventoryPayload {
    ReserveInventoryPayload {
        order_id: "ORD-1".to_string(),
        sku: "SKU-1".to_string(),
        category_id: "101".to_string(),
        quantity: 2,
    }
}

#[tokio::test]
async fn fetch_replaces_items_and_stamps_time() {
    let api = MockInventoryApi::with_items(sample_items());
    let store = store_with(&api);

    let started = Utc::now();
    let state = settle(&store, InventoryAction::FetchInventory).await;

    assert_eq!(state.items, sample_items());
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert!(state.last_updated.unwrap() >= started);
}

#[tokio::test]
async fn empty_backend_yields_empty_items() {
    let api = MockInventoryApi::new();
    let store = store_with(&api);

    let state = settle(&store, InventoryAction::FetchInventory).await;

    assert!(state.items.is_empty());
    assert!(state.last_updated.is_some());
}

#[tokio::test]
async fn loading_is_set_while_fetch_is_in_flight() {
    let api = MockInventoryApi::with_items(sample_items()).with_latency(Duration::from_millis(100));
    let store = store_with(&api);

    let mut handle = store.send(InventoryAction::FetchInventory).await.unwrap();
    assert!(store.state(|s| s.loading).await);

    handle.wait_with_timeout(SETTLE).await.unwrap();
    assert!(!store.state(|s| s.loading).await);
}

#[tokio::test]
async fn failed_fetch_keeps_previous_items() {
    let api = MockInventoryApi::with_items(sample_items());
    let store = store_with(&api);
    settle(&store, InventoryAction::FetchInventory).await;
    let first_update = store.state(|s| s.last_updated).await;

    api.set_items(vec![]);
    api.fail_next(server_failure(404, "Inventory endpoint missing"));
    let state = settle(&store, InventoryAction::FetchInventory).await;

    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Inventory endpoint missing"));
    assert_eq!(state.items, sample_items());
    assert_eq!(state.last_updated, first_update);
}

#[tokio::test]
async fn backend_error_message_points_at_server_logs() {
    let api = MockInventoryApi::new();
    api.fail_next(backend_failure());
    let store = store_with(&api);

    let state = settle(&store, InventoryAction::FetchInventory).await;

    assert!(state.error.unwrap().contains("Check server logs"));
}

#[tokio::test]
async fn reserve_always_clears_loading() {
    let api = MockInventoryApi::new();
    let store = store_with(&api);

    let state = settle(&store, InventoryAction::ReserveInventory(reserve_payload())).await;
    assert!(!state.loading);
    assert!(state.error.is_none());

    api.fail_next(network_failure());
    let state = settle(&store, InventoryAction::ReserveInventory(reserve_payload())).await;
    assert!(!state.loading);
    assert_eq!(
        state.error.as_deref(),
        Some("No response received from server. Please check your connection.")
    );
}

#[tokio::test]
async fn reserve_requires_refetch_to_show_changes() {
    let api = MockInventoryApi::new();
    let store = store_with(&api);

    let state = settle(&store, InventoryAction::ReserveInventory(reserve_payload())).await;
    assert!(state.items.is_empty());

    let state = settle(&store, InventoryAction::FetchInventory).await;
    assert_eq!(
        state.items,
        vec![InventoryItem::new("ORD-1", "SKU-1", "").with_quantities(2, 0)]
    );
}

#[tokio::test]
async fn declined_allocation_resolves_without_network() {
    let api = MockInventoryApi::new();
    let store = store_with(&api);

    let settled = store
        .send_and_wait_for(
            InventoryAction::AllocateInventory(AllocateInventoryPayload {
                order_id: "O1".to_string(),
                allocate_choice: AllocateChoice::No,
            }),
            InventoryAction::is_settlement,
            SETTLE,
        )
        .await
        .unwrap();

    assert_eq!(
        settled,
        InventoryAction::InventoryAllocated {
            outcome: AllocationOutcome::Declined {
                message: "Allocation cancelled by user choice".to_string(),
            },
        }
    );
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn accepted_allocation_uses_placeholder_reserve() {
    let api = MockInventoryApi::new();
    let store = store_with(&api);

    let state = settle(
        &store,
        InventoryAction::AllocateInventory(AllocateInventoryPayload {
            order_id: "O1".to_string(),
            allocate_choice: AllocateChoice::Yes,
        }),
    )
    .await;

    assert!(!state.loading);
    assert_eq!(
        api.calls(),
        vec![ApiCall::Reserve {
            sku: "DEFAULT_SKU".to_string(),
            quantity: 1,
            order_id: "O1".to_string(),
        }]
    );
}

#[tokio::test]
async fn failed_allocation_records_error() {
    let api = MockInventoryApi::new();
    api.fail_next(server_failure(409, "Order already allocated"));
    let store = store_with(&api);

    let state = settle(
        &store,
        InventoryAction::AllocateInventory(AllocateInventoryPayload {
            order_id: "O1".to_string(),
            allocate_choice: AllocateChoice::Yes,
        }),
    )
    .await;

    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Order already allocated"));
}

#[tokio::test]
async fn concurrent_requests_settle_last_writer_wins() {
    let api = MockInventoryApi::with_items(sample_items()).with_latency(Duration::from_millis(50));
    let store = store_with(&api);

    let mut reserve = store
        .send(InventoryAction::ReserveInventory(reserve_payload()))
        .await
        .unwrap();
    let mut fetch = store.send(InventoryAction::FetchInventory).await.unwrap();
    reserve.wait_with_timeout(SETTLE).await.unwrap();
    fetch.wait_with_timeout(SETTLE).await.unwrap();

    let state = store.state(Clone::clone).await;
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.items.len(), 3);
    assert_eq!(api.call_count(), 2);
}

#[tokio::test]
async fn clear_error_after_failure() {
    let api = MockInventoryApi::new();
    api.fail_next(backend_failure());
    let store = store_with(&api);
    settle(&store, InventoryAction::FetchInventory).await;

    let state = settle(&store, InventoryAction::ClearError).await;
    assert!(state.error.is_none());

    let state = settle(&store, InventoryAction::SetLoading(true)).await;
    assert!(state.loading);
}
