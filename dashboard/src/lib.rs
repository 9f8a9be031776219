//! Inventory reservation dashboard.
//!
//! A single state container tracks the inventory snapshot and the
//! fetch/reserve/allocate request lifecycle. Terminal views render from it.
//!
//! - [`types`]: state, payloads and actions
//! - [`validation`]: pure form validation and input sanitizing
//! - [`reducer`]: pending → fulfilled/rejected transitions and their effects
//! - [`ui`]: table, action form, notification and error region
//! - [`session`]: store, form and notification of a running dashboard
//! - [`cli`]: commands shared by the binary and its interactive shell
//!
//! # Quick Start
//!
//! ```no_run
//! use stockroom_dashboard::{InventoryAction, InventoryEnvironment, InventoryReducer, InventoryState};
//! use stockroom_client::{ApiConfig, InventoryClient, Mode};
//! use stockroom_core::environment::SystemClock;
//! use stockroom_runtime::Store;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = InventoryClient::new(&ApiConfig::for_mode(Mode::Development))?;
//! let env = InventoryEnvironment::new(Arc::new(client), Arc::new(SystemClock));
//! let store = Store::new(InventoryState::new(), InventoryReducer::new(), env);
//!
//! // Wait for the fetch to settle
//! store.send(InventoryAction::FetchInventory).await?.wait().await;
//!
//! let state = store.state(Clone::clone).await;
//! println!("{} items, error: {:?}", state.items.len(), state.error);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod reducer;
pub mod session;
pub mod types;
pub mod ui;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use reducer::{InventoryEnvironment, InventoryReducer};
pub use session::{InventoryStore, Session, SessionError};
pub use types::{
    AllocateChoice, AllocateInventoryPayload, AllocationOutcome, InventoryAction, InventoryState,
    ReserveInventoryPayload,
};
