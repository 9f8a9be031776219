//! A running dashboard: the store plus the presentation state around it
//!
//! [`Session`] owns the inventory store, the action form and the current
//! notification. Both the one-shot commands and the interactive shell go
//! through it.

use crate::reducer::{InventoryEnvironment, InventoryReducer};
use crate::types::{AllocationOutcome, InventoryAction, InventoryState};
use crate::ui::{ActionForm, Notification, NotificationKind, render_dashboard};
use crate::validation::FormValidation;
use std::sync::Arc;
use std::time::Duration;
use stockroom_client::{ApiError, InventoryApi, InventoryItem, InventoryPatch};
use stockroom_core::environment::Clock;
use stockroom_runtime::{Store, StoreError};
use thiserror::Error;
use tokio::sync::broadcast::error::TryRecvError;

/// The inventory store type
pub type InventoryStore = Store<InventoryState, InventoryAction, InventoryEnvironment, InventoryReducer>;

/// Failures surfaced by a [`Session`]
#[derive(Debug, Error)]
pub enum SessionError {
    /// The form input did not validate; nothing was dispatched
    #[error("Invalid input: {0}")]
    Validation(#[from] FormValidation),

    /// A request settled as rejected; the message is also in the state's error
    #[error("{0}")]
    Rejected(String),

    /// A direct backend call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The store did not settle the request in time
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request's effects finished without producing a settlement
    #[error("request finished without a result")]
    Unsettled,
}

/// Store, form and notification of one running dashboard
pub struct Session {
    store: InventoryStore,
    api: Arc<dyn InventoryApi>,
    clock: Arc<dyn Clock>,
    form: ActionForm,
    notification: Option<Notification>,
    settle_timeout: Duration,
}

impl Session {
    /// Start a session with an empty, idle state
    ///
    /// `settle_timeout` bounds how long a request may stay pending.
    #[must_use]
    pub fn new(api: Arc<dyn InventoryApi>, clock: Arc<dyn Clock>, settle_timeout: Duration) -> Self {
        let environment = InventoryEnvironment::new(Arc::clone(&api), Arc::clone(&clock));
        Self {
            store: Store::new(InventoryState::new(), InventoryReducer::new(), environment),
            api,
            clock,
            form: ActionForm::default(),
            notification: None,
            settle_timeout,
        }
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &InventoryStore {
        &self.store
    }

    /// Snapshot of the state container
    pub async fn state(&self) -> InventoryState {
        self.store.state(Clone::clone).await
    }

    /// Current form input
    #[must_use]
    pub const fn form(&self) -> &ActionForm {
        &self.form
    }

    /// The notification still showing, dropping it once expired
    pub fn notification(&mut self) -> Option<&Notification> {
        let now = self.clock.now();
        if self.notification.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notification = None;
        }
        self.notification.as_ref()
    }

    /// Raise a notification, replacing any previous one
    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.notification = Some(Notification::new(message, kind, self.clock.now()));
    }

    /// Dismiss the notification
    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Render the dashboard from the current state
    pub async fn render(&mut self) -> String {
        let state = self.state().await;
        render_dashboard(&state, self.notification())
    }

    /// Dispatch a request and wait until it has settled and been reduced
    ///
    /// # Errors
    ///
    /// - [`SessionError::Rejected`]: the request settled as rejected
    /// - [`SessionError::Store`]: it did not settle within the timeout
    /// - [`SessionError::Unsettled`]: its effects produced no settlement
    pub async fn request(&self, action: InventoryAction) -> Result<InventoryAction, SessionError> {
        let mut observed = self.store.subscribe_actions();
        let mut handle = self.store.send(action).await?;
        handle.wait_with_timeout(self.settle_timeout).await?;

        loop {
            match observed.try_recv() {
                Ok(settled) if settled.is_settlement() => {
                    return match settled.rejection() {
                        Some(message) => Err(SessionError::Rejected(message.to_string())),
                        None => Ok(settled),
                    };
                },
                Ok(_) => {},
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Missed store actions while waiting for a settlement");
                },
                Err(TryRecvError::Empty | TryRecvError::Closed) => {
                    return Err(SessionError::Unsettled);
                },
            }
        }
    }

    /// Re-fetch the inventory snapshot
    ///
    /// # Errors
    ///
    /// See [`Session::request`].
    pub async fn refresh(&self) -> Result<usize, SessionError> {
        self.request(InventoryAction::FetchInventory).await?;
        Ok(self.store.state(|s| s.items.len()).await)
    }

    /// Dismiss the stored error
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if the store rejects the action.
    pub async fn dismiss_error(&self) -> Result<(), SessionError> {
        self.store.send(InventoryAction::ClearError).await?;
        Ok(())
    }

    /// Replace the form input
    pub fn fill_form(&mut self, form: ActionForm) {
        self.form = form;
    }

    /// Validate and submit the form
    ///
    /// Invalid input is returned without dispatching. On success the form
    /// resets, a notification is raised and the inventory is re-fetched,
    /// since reserve and allocate never merge into the snapshot.
    ///
    /// # Errors
    ///
    /// [`SessionError::Validation`] for invalid input, otherwise see
    /// [`Session::request`]. A failed submission keeps the form input.
    pub async fn submit_form(&mut self) -> Result<(), SessionError> {
        let action = self.form.submission()?;
        let settled = match self.request(action).await {
            Ok(settled) => settled,
            Err(error) => {
                // rejections already show in the error region
                if !matches!(error, SessionError::Rejected(_)) {
                    self.notify(error.to_string(), NotificationKind::Error);
                }
                return Err(error);
            },
        };
        self.form.reset();

        let refetch = match settled {
            InventoryAction::InventoryReserved { item } => {
                let message = match item {
                    Some(item) => format!("Reserved inventory for order {} ({})", item.order_id, item.sku),
                    None => "Inventory reserved".to_string(),
                };
                self.notify(message, NotificationKind::Success);
                true
            },
            InventoryAction::InventoryAllocated {
                outcome: AllocationOutcome::Allocated(item),
            } => {
                let message = match item {
                    Some(item) => format!("Allocated inventory for order {}", item.order_id),
                    None => "Inventory allocated".to_string(),
                };
                self.notify(message, NotificationKind::Success);
                true
            },
            InventoryAction::InventoryAllocated {
                outcome: AllocationOutcome::Declined { message },
            } => {
                self.notify(message, NotificationKind::Info);
                false
            },
            _ => false,
        };

        if refetch {
            if let Err(error) = self.refresh().await {
                tracing::warn!(%error, "Re-fetch after submission failed");
            }
        }
        Ok(())
    }

    /// `GET /inventory/{sku}`
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Api`] if the backend call fails.
    pub async fn show(&mut self, sku: &str) -> Result<InventoryItem, SessionError> {
        let result = self.api.get_inventory(sku.to_string()).await;
        self.settle_direct(result, |_| None)
    }

    /// Create an item, then re-fetch
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Api`] if the backend call fails.
    pub async fn create(&mut self, item: InventoryItem) -> Result<Option<InventoryItem>, SessionError> {
        let message = format!("Created {} for order {}", item.sku, item.order_id);
        let result = self.api.create_inventory(item).await;
        let created = self.settle_direct(result, |_| Some(message))?;
        self.refresh_quietly().await;
        Ok(created)
    }

    /// Update an item, then re-fetch
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Api`] if the backend call fails.
    pub async fn update(
        &mut self,
        sku: &str,
        patch: InventoryPatch,
    ) -> Result<Option<InventoryItem>, SessionError> {
        let result = self.api.update_inventory(sku.to_string(), patch).await;
        let updated = self.settle_direct(result, |_| Some(format!("Updated {sku}")))?;
        self.refresh_quietly().await;
        Ok(updated)
    }

    /// Adjust a quantity by a signed delta, then re-fetch
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Api`] if the backend call fails.
    pub async fn adjust(
        &mut self,
        sku: &str,
        quantity: i64,
        username: Option<String>,
    ) -> Result<Option<InventoryItem>, SessionError> {
        let result = self.api.adjust_inventory(sku.to_string(), quantity, username).await;
        let adjusted =
            self.settle_direct(result, |_| Some(format!("Adjusted {sku} by {quantity}")))?;
        self.refresh_quietly().await;
        Ok(adjusted)
    }

    /// Delete every row of a SKU, then re-fetch
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Api`] if the backend call fails.
    pub async fn delete(&mut self, sku: &str) -> Result<(), SessionError> {
        let result = self.api.delete_inventory(sku.to_string()).await;
        self.settle_direct(result, |_| Some(format!("Deleted {sku}")))?;
        self.refresh_quietly().await;
        Ok(())
    }

    /// Release a quantity of a SKU, then re-fetch
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Api`] if the backend call fails.
    pub async fn cancel(&mut self, sku: &str, quantity: u32) -> Result<(), SessionError> {
        let result = self.api.cancel_inventory(sku.to_string(), quantity).await;
        self.settle_direct(result, |_| Some(format!("Cancelled {quantity} of {sku}")))?;
        self.refresh_quietly().await;
        Ok(())
    }

    /// Turn a direct backend result into a notification
    fn settle_direct<T>(
        &mut self,
        result: Result<T, ApiError>,
        success: impl FnOnce(&T) -> Option<String>,
    ) -> Result<T, SessionError> {
        match result {
            Ok(value) => {
                if let Some(message) = success(&value) {
                    self.notify(message, NotificationKind::Success);
                }
                Ok(value)
            },
            Err(error) => {
                tracing::warn!(status = ?error.status(), %error, "Inventory operation failed");
                self.notify(error.to_string(), NotificationKind::Error);
                Err(error.into())
            },
        }
    }

    async fn refresh_quietly(&self) {
        if let Err(error) = self.refresh().await {
            tracing::warn!(%error, "Re-fetch failed");
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("form", &self.form)
            .field("notification", &self.notification)
            .field("settle_timeout", &self.settle_timeout)
            .finish_non_exhaustive()
    }
}
