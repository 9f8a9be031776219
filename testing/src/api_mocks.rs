//! In-memory inventory backend for tests
//!
//! [`MockInventoryApi`] keeps items in memory, records every call, and can
//! be scripted to fail the next calls with a given [`ApiError`].

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Test utilities document panics where critical

use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use stockroom_client::{ApiError, ApiFuture, InventoryApi, InventoryItem, InventoryPatch};
use stockroom_client::error::BACKEND_ERROR_MESSAGE;

/// A call received by [`MockInventoryApi`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiCall {
    /// `list_inventory`
    List,
    /// `get_inventory`
    Get {
        /// Requested SKU
        sku: String,
    },
    /// `create_inventory`
    Create {
        /// Submitted item
        item: InventoryItem,
    },
    /// `update_inventory`
    Update {
        /// Path SKU
        sku: String,
        /// Submitted patch
        patch: InventoryPatch,
    },
    /// `adjust_inventory`
    Adjust {
        /// Path SKU
        sku: String,
        /// Signed delta
        quantity: i64,
        /// Attributed user, if any
        username: Option<String>,
    },
    /// `reserve_inventory` (and `allocate_inventory`, which delegates to it)
    Reserve {
        /// Path SKU
        sku: String,
        /// Quantity to reserve
        quantity: u32,
        /// Order reserved against
        order_id: String,
    },
    /// `delete_inventory`
    Delete {
        /// Path SKU
        sku: String,
    },
    /// `cancel_inventory`
    Cancel {
        /// Path SKU
        sku: String,
        /// Quantity to release
        quantity: u32,
    },
}

/// In-memory [`InventoryApi`] for fast, deterministic tests
///
/// Clones share the same items, call log and failure queue.
///
/// # Example
///
/// ```
/// use stockroom_testing::{ApiCall, MockInventoryApi, backend_failure};
/// use stockroom_client::{InventoryApi, InventoryItem};
///
/// # tokio_test::block_on(async {
/// let api = MockInventoryApi::with_items(vec![InventoryItem::new("O1", "SKU-1", "101")]);
/// api.fail_next(backend_failure());
///
/// assert!(api.list_inventory().await.is_err());
/// assert_eq!(api.list_inventory().await.map(|items| items.len()).ok(), Some(1));
/// assert_eq!(api.calls(), vec![ApiCall::List, ApiCall::List]);
/// # });
/// ```
#[derive(Clone, Debug, Default)]
pub struct MockInventoryApi {
    items: Arc<RwLock<Vec<InventoryItem>>>,
    failures: Arc<RwLock<VecDeque<ApiError>>>,
    calls: Arc<RwLock<Vec<ApiCall>>>,
    latency: Option<Duration>,
    status_only: bool,
}

impl MockInventoryApi {
    /// Create an empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend holding `items`
    #[must_use]
    pub fn with_items(items: Vec<InventoryItem>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
            ..Self::default()
        }
    }

    /// Delay every response by `latency`
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Answer writes with a bare success and no item body
    #[must_use]
    pub const fn with_status_only_writes(mut self) -> Self {
        self.status_only = true;
        self
    }

    /// Fail the next call with `error`; queued failures are consumed in order
    pub fn fail_next(&self, error: ApiError) {
        self.failures.write().unwrap().push_back(error);
    }

    /// Replace the stored items
    pub fn set_items(&self, items: Vec<InventoryItem>) {
        *self.items.write().unwrap() = items;
    }

    /// Snapshot of the stored items
    #[must_use]
    pub fn items(&self) -> Vec<InventoryItem> {
        self.items.read().unwrap().clone()
    }

    /// Every call received so far, oldest first
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of calls received so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Record the call, wait out the latency, then hand back a scripted failure if any
    async fn begin(&self, call: ApiCall) -> Result<(), ApiError> {
        self.calls.write().unwrap().push(call);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let failure = self.failures.write().unwrap().pop_front();
        failure.map_or(Ok(()), Err)
    }

    fn reply(&self, item: InventoryItem) -> Option<InventoryItem> {
        (!self.status_only).then_some(item)
    }

    fn find(&self, sku: &str) -> Result<InventoryItem, ApiError> {
        self.items
            .read()
            .unwrap()
            .iter()
            .find(|item| item.sku == sku)
            .cloned()
            .ok_or_else(|| not_found(sku))
    }
}

impl InventoryApi for MockInventoryApi {
    fn list_inventory(&self) -> ApiFuture<'_, Vec<InventoryItem>> {
        Box::pin(async move {
            self.begin(ApiCall::List).await?;
            Ok(self.items())
        })
    }

    fn get_inventory(&self, sku: String) -> ApiFuture<'_, InventoryItem> {
        Box::pin(async move {
            self.begin(ApiCall::Get { sku: sku.clone() }).await?;
            self.find(&sku)
        })
    }

    fn create_inventory(&self, item: InventoryItem) -> ApiFuture<'_, Option<InventoryItem>> {
        Box::pin(async move {
            self.begin(ApiCall::Create { item: item.clone() }).await?;
            self.items.write().unwrap().push(item.clone());
            Ok(self.reply(item))
        })
    }

    fn update_inventory(
        &self,
        sku: String,
        patch: InventoryPatch,
    ) -> ApiFuture<'_, Option<InventoryItem>> {
        Box::pin(async move {
            self.begin(ApiCall::Update {
                sku: sku.clone(),
                patch: patch.clone(),
            })
            .await?;

            let mut items = self.items.write().unwrap();
            let item = items
                .iter_mut()
                .find(|item| item.sku == sku)
                .ok_or_else(|| not_found(&sku))?;
            if let Some(order_id) = patch.order_id {
                item.order_id = order_id;
            }
            if let Some(category_id) = patch.category_id {
                item.category_id = category_id;
            }
            if let Some(reserved) = patch.order_reserved_qty {
                item.order_reserved_qty = reserved;
            }
            if let Some(allocated) = patch.order_allocated_qty {
                item.order_allocated_qty = allocated;
            }
            Ok(self.reply(item.clone()))
        })
    }

    fn adjust_inventory(
        &self,
        sku: String,
        quantity: i64,
        username: Option<String>,
    ) -> ApiFuture<'_, Option<InventoryItem>> {
        Box::pin(async move {
            self.begin(ApiCall::Adjust {
                sku: sku.clone(),
                quantity,
                username,
            })
            .await?;

            let mut items = self.items.write().unwrap();
            let item = items
                .iter_mut()
                .find(|item| item.sku == sku)
                .ok_or_else(|| not_found(&sku))?;
            item.order_reserved_qty = item
                .order_reserved_qty
                .saturating_add_signed(quantity);
            Ok(self.reply(item.clone()))
        })
    }

    fn reserve_inventory(
        &self,
        sku: String,
        quantity: u32,
        order_id: String,
    ) -> ApiFuture<'_, Option<InventoryItem>> {
        Box::pin(async move {
            self.begin(ApiCall::Reserve {
                sku: sku.clone(),
                quantity,
                order_id: order_id.clone(),
            })
            .await?;

            let mut items = self.items.write().unwrap();
            if let Some(item) = items
                .iter_mut()
                .find(|item| item.sku == sku && item.order_id == order_id)
            {
                item.order_reserved_qty += u64::from(quantity);
                return Ok(self.reply(item.clone()));
            }
            let item = InventoryItem::new(order_id, sku, "").with_quantities(u64::from(quantity), 0);
            items.push(item.clone());
            Ok(self.reply(item))
        })
    }

    fn delete_inventory(&self, sku: String) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            self.begin(ApiCall::Delete { sku: sku.clone() }).await?;
            let mut items = self.items.write().unwrap();
            let before = items.len();
            items.retain(|item| item.sku != sku);
            if items.len() == before {
                return Err(not_found(&sku));
            }
            Ok(())
        })
    }

    fn cancel_inventory(&self, sku: String, quantity: u32) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            self.begin(ApiCall::Cancel {
                sku: sku.clone(),
                quantity,
            })
            .await?;

            let mut items = self.items.write().unwrap();
            let item = items
                .iter_mut()
                .find(|item| item.sku == sku)
                .ok_or_else(|| not_found(&sku))?;
            item.order_reserved_qty = item.order_reserved_qty.saturating_sub(u64::from(quantity));
            Ok(())
        })
    }
}

/// A non-500 server rejection with a backend-provided message
#[must_use]
pub fn server_failure(status: u16, message: &str) -> ApiError {
    ApiError::Server {
        status,
        status_text: String::new(),
        message: message.to_string(),
        body: json!({ "message": message }),
        backend_error: false,
    }
}

/// An HTTP 500 as the real client reports it
#[must_use]
pub fn backend_failure() -> ApiError {
    ApiError::Server {
        status: 500,
        status_text: "Internal Server Error".to_string(),
        message: BACKEND_ERROR_MESSAGE.to_string(),
        body: Value::Null,
        backend_error: true,
    }
}

/// A request that never got a response
#[must_use]
pub fn network_failure() -> ApiError {
    ApiError::Network("connection refused".to_string())
}

fn not_found(sku: &str) -> ApiError {
    server_failure(404, &format!("Inventory item {sku} not found"))
}
