//! The inventory backend as an injectable dependency
//!
//! Reducers capture an `Arc<dyn InventoryApi>` inside their effects, so the
//! trait returns boxed futures instead of using `async fn`.

use crate::error::ApiError;
use crate::types::{InventoryItem, InventoryPatch};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by every [`InventoryApi`] operation
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Operations offered by the inventory backend
///
/// Every operation resolves to the unwrapped payload or an [`ApiError`].
/// Writes resolve to `None` when a 2xx body carries no item object, such as
/// a 204, a wrapped `null` or a text confirmation.
pub trait InventoryApi: Send + Sync {
    /// `GET /inventory`; an empty body yields an empty list
    fn list_inventory(&self) -> ApiFuture<'_, Vec<InventoryItem>>;

    /// `GET /inventory/{sku}`
    fn get_inventory(&self, sku: String) -> ApiFuture<'_, InventoryItem>;

    /// `POST /inventory`
    fn create_inventory(&self, item: InventoryItem) -> ApiFuture<'_, Option<InventoryItem>>;

    /// `PUT /inventory/{sku}`; the path SKU is written into the body
    fn update_inventory(
        &self,
        sku: String,
        patch: InventoryPatch,
    ) -> ApiFuture<'_, Option<InventoryItem>>;

    /// `PUT /inventory/{sku}/adjust`, attributed to `username` or `"system"`
    fn adjust_inventory(
        &self,
        sku: String,
        quantity: i64,
        username: Option<String>,
    ) -> ApiFuture<'_, Option<InventoryItem>>;

    /// `POST /inventory/{sku}/reserve`
    fn reserve_inventory(
        &self,
        sku: String,
        quantity: u32,
        order_id: String,
    ) -> ApiFuture<'_, Option<InventoryItem>>;

    /// Allocation has no endpoint of its own and goes through reserve
    fn allocate_inventory(
        &self,
        sku: String,
        quantity: u32,
        order_id: String,
    ) -> ApiFuture<'_, Option<InventoryItem>> {
        self.reserve_inventory(sku, quantity, order_id)
    }

    /// `DELETE /inventory/{sku}`
    fn delete_inventory(&self, sku: String) -> ApiFuture<'_, ()>;

    /// `DELETE /inventory/{sku}/quantity/{quantity}`
    fn cancel_inventory(&self, sku: String, quantity: u32) -> ApiFuture<'_, ()>;
}
