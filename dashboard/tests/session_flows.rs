//! Form submission, direct operations and the interactive shell

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;
use std::time::Duration;
use stockroom_client::InventoryItem;
use stockroom_dashboard::cli::{self, Command};
use stockroom_dashboard::ui::{ActionForm, NotificationKind};
use stockroom_dashboard::validation::Field;
use stockroom_dashboard::{AllocateChoice, Session, SessionError};
use stockroom_testing::helpers::{init_test_tracing, sample_items};
use stockroom_testing::{ApiCall, MockInventoryApi, backend_failure, server_failure, test_clock};

fn session_with(api: &MockInventoryApi) -> Session {
    init_test_tracing();
    Session::new(Arc::new(api.clone()), Arc::new(test_clock()), Duration::from_secs(2))
}

#[tokio::test]
async fn invalid_form_is_never_dispatched() {
    let api = MockInventoryApi::new();
    let mut session = session_with(&api);
    session.fill_form(ActionForm::reserve("", "SKU-1", "101", "0"));

    let Err(SessionError::Validation(validation)) = session.submit_form().await else {
        panic!("expected a validation failure");
    };

    assert!(validation.error(Field::OrderId).is_some());
    assert!(validation.error(Field::Quantity).is_some());
    assert_eq!(api.call_count(), 0);
    assert_eq!(session.form().sku, "SKU-1");
    assert!(!session.state().await.loading);
}

#[tokio::test]
async fn successful_reserve_resets_form_and_refetches() {
    let api = MockInventoryApi::with_items(sample_items());
    let mut session = session_with(&api);
    session.fill_form(ActionForm::reserve("ORD-9", "SKU-9", "103", "4"));

    session.submit_form().await.unwrap();

    assert_eq!(session.form(), &ActionForm::default());
    assert_eq!(
        api.calls(),
        vec![
            ApiCall::Reserve {
                sku: "SKU-9".to_string(),
                quantity: 4,
                order_id: "ORD-9".to_string(),
            },
            ApiCall::List,
        ]
    );
    let state = session.state().await;
    assert_eq!(state.items.len(), 4);
    assert_eq!(
        session.notification().map(|n| n.kind),
        Some(NotificationKind::Success)
    );
}

#[tokio::test]
async fn status_only_reserve_is_a_success() {
    let api = MockInventoryApi::with_items(sample_items()).with_status_only_writes();
    let mut session = session_with(&api);
    session.fill_form(ActionForm::reserve("ORD-9", "SKU-9", "103", "4"));

    session.submit_form().await.unwrap();

    let state = session.state().await;
    assert!(state.error.is_none());
    assert!(!state.loading);
    assert_eq!(state.items.len(), 4);
    assert_eq!(session.form(), &ActionForm::default());
    let notification = session.notification().unwrap();
    assert_eq!(notification.kind, NotificationKind::Success);
    assert_eq!(notification.message, "Inventory reserved");
}

#[tokio::test]
async fn rejected_reserve_keeps_input_and_shows_error_region() {
    let api = MockInventoryApi::new();
    api.fail_next(server_failure(422, "Insufficient quantity available"));
    let mut session = session_with(&api);
    let form = ActionForm::reserve("ORD-1", "SKU-1", "101", "50");
    session.fill_form(form.clone());

    let result = session.submit_form().await;

    assert!(matches!(result, Err(SessionError::Rejected(ref m)) if m == "Insufficient quantity available"));
    assert_eq!(session.form(), &form);
    assert_eq!(api.call_count(), 1);

    let view = session.render().await;
    assert!(view.starts_with("Something went wrong!\nInsufficient quantity available"));

    session.dismiss_error().await.unwrap();
    assert!(session.render().await.starts_with("Current Inventory"));
}

#[tokio::test]
async fn declined_allocation_notifies_without_calls() {
    let api = MockInventoryApi::new();
    let mut session = session_with(&api);
    session.fill_form(ActionForm::allocate("O1", AllocateChoice::No));

    session.submit_form().await.unwrap();

    assert_eq!(api.call_count(), 0);
    let notification = session.notification().unwrap();
    assert_eq!(notification.kind, NotificationKind::Info);
    assert_eq!(notification.message, "Allocation cancelled by user choice");
}

#[tokio::test]
async fn direct_operation_failure_raises_error_notification() {
    let api = MockInventoryApi::with_items(sample_items());
    api.fail_next(backend_failure());
    let mut session = session_with(&api);

    let result = session.delete("SKU-1").await;

    assert!(matches!(result, Err(SessionError::Api(ref e)) if e.is_backend_error()));
    assert_eq!(
        session.notification().map(|n| n.kind),
        Some(NotificationKind::Error)
    );
    assert_eq!(api.items().len(), 3);
}

#[tokio::test]
async fn adjust_and_cancel_refetch() {
    let api = MockInventoryApi::with_items(vec![
        InventoryItem::new("ORD-1", "SKU-1", "101").with_quantities(5, 0),
    ]);
    let mut session = session_with(&api);

    session.adjust("SKU-1", 3, None).await.unwrap();
    assert_eq!(session.state().await.items[0].order_reserved_qty, 8);

    session.cancel("SKU-1", 6).await.unwrap();
    assert_eq!(session.state().await.items[0].order_reserved_qty, 2);

    assert!(api.calls().contains(&ApiCall::Adjust {
        sku: "SKU-1".to_string(),
        quantity: 3,
        username: None,
    }));
}

#[tokio::test]
async fn show_renders_item_detail() {
    let api = MockInventoryApi::with_items(sample_items());
    let mut session = session_with(&api);

    let (view, result) = cli::execute(
        &mut session,
        Command::Show {
            sku: "SKU-2".to_string(),
        },
    )
    .await;

    result.unwrap();
    assert!(view.contains("SKU           SKU-2"));
    assert!(view.contains("Category ID   102"));
}

#[tokio::test]
async fn execute_appends_validation_errors() {
    let api = MockInventoryApi::new();
    let mut session = session_with(&api);

    let (view, result) = cli::execute(
        &mut session,
        Command::Reserve {
            order: "O1".to_string(),
            sku: "SKU-1".to_string(),
            category: "101".to_string(),
            quantity: "-3".to_string(),
        },
    )
    .await;

    assert!(matches!(result, Err(SessionError::Validation(_))));
    assert!(view.contains("quantity: Quantity must be positive"));
}

#[tokio::test]
async fn shell_runs_commands_until_quit() {
    let api = MockInventoryApi::with_items(sample_items());
    let mut session = session_with(&api);
    let input: &[u8] = b"reserve --order ORD-3 --sku SKU-3 --category 105 --quantity 2\n\
        \n\
        bogus\n\
        allocate --order ORD-3 --choice no\n\
        quit\n\
        list\n";
    let mut output = Vec::new();

    cli::run_shell(&mut session, input, &mut output).await.unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Showing 3 inventory items"));
    assert!(text.contains("Showing 4 inventory items"));
    assert!(text.contains("unrecognized subcommand"));
    assert!(text.contains("Allocation cancelled by user choice"));
    // initial fetch, reserve, re-fetch; nothing after quit
    assert_eq!(api.call_count(), 3);
}

#[tokio::test]
async fn shell_dismiss_clears_error() {
    let api = MockInventoryApi::new();
    api.fail_next(backend_failure());
    let mut session = session_with(&api);
    let input: &[u8] = b"dismiss\n";
    let mut output = Vec::new();

    cli::run_shell(&mut session, input, &mut output).await.unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Something went wrong!"));
    assert!(session.state().await.error.is_none());
}
