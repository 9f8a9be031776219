//! # Inventory REST Client
//!
//! Typed access to the inventory backend: list, fetch, create, update,
//! adjust, reserve, allocate, delete and cancel.
//!
//! ## Example
//!
//! ```no_run
//! use stockroom_client::{ApiConfig, InventoryApi, InventoryClient, Mode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = InventoryClient::new(&ApiConfig::for_mode(Mode::Development))?;
//!
//!     let items = client.list_inventory().await?;
//!     println!("{} inventory items", items.len());
//!
//!     client
//!         .reserve_inventory("SKU-1".to_string(), 2, "ORDER-7".to_string())
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Response handling
//!
//! - `{success, data, message}` wrappers are unwrapped; bare payloads pass through
//! - Writes answered with 2xx but no item object resolve to `Ok(None)`
//! - HTTP 500 is reported as a backend error with a fixed explanation
//! - Other non-2xx statuses carry the backend's `message` when it has one
//! - Requests that never got a response become [`ApiError::Network`]

pub mod api;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod types;

pub use api::{ApiFuture, InventoryApi};
pub use client::InventoryClient;
pub use config::{ApiConfig, Mode, ParseModeError};
pub use error::{ApiError, ErrorEnvelope};
pub use types::{InventoryItem, InventoryPatch};
