//! Terminal presentation
//!
//! Every renderer is a pure function from state to text, so the shell and
//! the one-shot commands print exactly the same views.

pub mod dashboard;
pub mod form;
pub mod notification;
pub mod table;

pub use dashboard::{render_dashboard, render_error_region};
pub use form::{ActionForm, FormAction};
pub use notification::{Notification, NotificationKind};
pub use table::{render_item, render_table};
