//! Full dashboard view: error region, loading indicator, table, notification

use crate::types::{InventoryAction, InventoryState};
use crate::ui::notification::Notification;
use crate::ui::table::render_table;
use std::fmt::Write;

/// Action dispatched by the error region's dismiss control
pub const DISMISS_ERROR: InventoryAction = InventoryAction::ClearError;

/// Render the error region for `error`
#[must_use]
pub fn render_error_region(error: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Something went wrong!");
    let _ = writeln!(out, "{error}");
    let _ = writeln!(out, "[dismiss] Clear Error");
    out
}

/// Render the whole dashboard
///
/// While an error is stored the error region replaces the table. The
/// notification, if any, is rendered last in both cases.
#[must_use]
pub fn render_dashboard(state: &InventoryState, notification: Option<&Notification>) -> String {
    let mut out = match state.error.as_deref() {
        Some(error) => render_error_region(error),
        None => {
            let mut body = String::new();
            if state.loading {
                let _ = writeln!(body, "Loading...");
            }
            body.push_str(&render_table(state));
            body
        },
    };

    if let Some(last_updated) = state.last_updated {
        let _ = writeln!(out, "Last updated {}", last_updated.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    if let Some(notification) = notification {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", notification.render());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::notification::NotificationKind;
    use chrono::DateTime;
    use stockroom_client::InventoryItem;

    #[test]
    fn error_replaces_table() {
        let state = InventoryState {
            items: vec![InventoryItem::new("O1", "SKU-1", "101")],
            error: Some("SKU not found".to_string()),
            ..InventoryState::new()
        };
        let text = render_dashboard(&state, None);
        assert!(text.starts_with("Something went wrong!\nSKU not found\n"));
        assert!(text.contains("Clear Error"));
        assert!(!text.contains("Current Inventory"));
    }

    #[test]
    fn loading_indicator_precedes_table() {
        let state = InventoryState {
            loading: true,
            ..InventoryState::new()
        };
        let text = render_dashboard(&state, None);
        assert!(text.starts_with("Loading...\nCurrent Inventory"));
    }

    #[test]
    fn notification_and_timestamp_are_appended() {
        let state = InventoryState {
            last_updated: Some(DateTime::UNIX_EPOCH),
            ..InventoryState::new()
        };
        let notification = Notification::new("Saved", NotificationKind::Success, DateTime::UNIX_EPOCH);
        let text = render_dashboard(&state, Some(&notification));
        assert!(text.contains("Last updated 1970-01-01 00:00:00 UTC"));
        assert!(text.trim_end().ends_with("[success] Saved  (x to dismiss)"));
    }

    #[test]
    fn dismiss_clears_error() {
        assert_eq!(DISMISS_ERROR, InventoryAction::ClearError);
    }
}
