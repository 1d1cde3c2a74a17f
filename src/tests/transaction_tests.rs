use crate::core::errors::BudgetError;
use crate::core::models::{Transaction, TransactionKind, TransactionPatch};
use crate::tests::{create_test_service, register_test_user};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

#[test]
fn test_transaction_wire_shape() {
    let tx = Transaction {
        id: "t1".to_string(),
        owner_id: "u1".to_string(),
        kind: TransactionKind::Expense,
        amount: 9.5,
        category: "food".to_string(),
        description: None,
        date: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    };
    let value = serde_json::to_value(&tx).unwrap();
    assert_eq!(value["type"], "expense");
    assert_eq!(value["amount"], 9.5);
    assert_eq!(value["owner_id"], "u1");
}

#[tokio::test]
async fn test_add_and_get_round_trip() {
    let service = create_test_service();
    let user = register_test_user(&service, "Alice", "alice@example.com").await;

    let added = service
        .add_transaction(
            &user.id,
            TransactionKind::Income,
            100.0,
            "salary".to_string(),
            Some("July paycheck".to_string()),
        )
        .await
        .unwrap();

    let fetched = service.get_transaction(&user.id, &added.id).await.unwrap();
    assert_eq!(fetched.id, added.id);
    assert_eq!(fetched.owner_id, user.id);
    assert_eq!(fetched.kind, TransactionKind::Income);
    assert_eq!(fetched.amount, 100.0);
    assert_eq!(fetched.category, "salary");
    assert_eq!(fetched.description.as_deref(), Some("July paycheck"));
    assert_eq!(fetched.date, added.date);
}

#[tokio::test]
async fn test_add_rejects_invalid_input() {
    let service = create_test_service();
    let user = register_test_user(&service, "Alice", "alice@example.com").await;

    for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let result = service
            .add_transaction(&user.id, TransactionKind::Expense, amount, "food".to_string(), None)
            .await;
        assert!(matches!(result, Err(BudgetError::InvalidInput(_, _))));
    }

    let result = service
        .add_transaction(&user.id, TransactionKind::Expense, 10.0, "  ".to_string(), None)
        .await;
    assert!(matches!(result, Err(BudgetError::InvalidInput(_, _))));
}

#[tokio::test]
async fn test_add_unknown_owner() {
    let service = create_test_service();
    let result = service
        .add_transaction(
            &Uuid::new_v4().to_string(),
            TransactionKind::Expense,
            10.0,
            "food".to_string(),
            None,
        )
        .await;
    assert!(matches!(result, Err(BudgetError::UserNotFound(_))));
}

#[tokio::test]
async fn test_budget_ceiling_enforced() {
    let service = create_test_service();
    let user = register_test_user(&service, "Alice", "alice@example.com").await;
    service.set_budget(&user.id, 100.0).await.unwrap();

    service
        .add_transaction(&user.id, TransactionKind::Expense, 60.0, "rent".to_string(), None)
        .await
        .unwrap();
    // Reaching the ceiling exactly is still within budget
    service
        .add_transaction(&user.id, TransactionKind::Expense, 40.0, "food".to_string(), None)
        .await
        .unwrap();

    let result = service
        .add_transaction(&user.id, TransactionKind::Expense, 0.01, "food".to_string(), None)
        .await;
    assert!(matches!(result, Err(BudgetError::BudgetExceeded { .. })));

    // The rejected add wrote nothing
    let transactions = service.list_transactions(&user.id).await.unwrap();
    assert_eq!(transactions.len(), 2);
}

#[tokio::test]
async fn test_zero_budget_means_unlimited() {
    let service = create_test_service();
    let user = register_test_user(&service, "Alice", "alice@example.com").await;
    assert_eq!(user.budget, 0.0);

    service
        .add_transaction(&user.id, TransactionKind::Expense, 999_999.0, "boat".to_string(), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_income_not_budget_checked() {
    let service = create_test_service();
    let user = register_test_user(&service, "Alice", "alice@example.com").await;
    service.set_budget(&user.id, 50.0).await.unwrap();

    service
        .add_transaction(&user.id, TransactionKind::Income, 1000.0, "salary".to_string(), None)
        .await
        .unwrap();
    service
        .add_transaction(&user.id, TransactionKind::Expense, 40.0, "food".to_string(), None)
        .await
        .unwrap();

    // Income does not consume the ceiling, but expenses do
    let result = service
        .add_transaction(&user.id, TransactionKind::Expense, 20.0, "food".to_string(), None)
        .await;
    assert!(matches!(result, Err(BudgetError::BudgetExceeded { .. })));
}

#[tokio::test]
async fn test_other_users_records_are_forbidden() {
    let service = create_test_service();
    let alice = register_test_user(&service, "Alice", "alice@example.com").await;
    let bob = register_test_user(&service, "Bob", "bob@example.com").await;

    let tx = service
        .add_transaction(&alice.id, TransactionKind::Expense, 10.0, "food".to_string(), None)
        .await
        .unwrap();

    let result = service.get_transaction(&bob.id, &tx.id).await;
    assert!(matches!(result, Err(BudgetError::NotRecordOwner)));

    let result = service
        .update_transaction(&bob.id, &tx.id, TransactionPatch::default())
        .await;
    assert!(matches!(result, Err(BudgetError::NotRecordOwner)));

    let result = service.delete_transaction(&bob.id, &tx.id).await;
    assert!(matches!(result, Err(BudgetError::NotRecordOwner)));

    // The owner is unaffected
    assert!(service.get_transaction(&alice.id, &tx.id).await.is_ok());
}

#[tokio::test]
async fn test_missing_id_is_not_found() {
    let service = create_test_service();
    let user = register_test_user(&service, "Alice", "alice@example.com").await;
    let missing = Uuid::new_v4().to_string();

    let result = service.get_transaction(&user.id, &missing).await;
    assert!(matches!(result, Err(BudgetError::TransactionNotFound(_))));

    let result = service
        .update_transaction(&user.id, &missing, TransactionPatch::default())
        .await;
    assert!(matches!(result, Err(BudgetError::TransactionNotFound(_))));

    let result = service.delete_transaction(&user.id, &missing).await;
    assert!(matches!(result, Err(BudgetError::TransactionNotFound(_))));
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let service = create_test_service();
    let user = register_test_user(&service, "Alice", "alice@example.com").await;

    // Insert out of chronological order, then pin explicit dates
    let dates = [
        Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap(),
    ];
    for date in dates {
        let tx = service
            .add_transaction(&user.id, TransactionKind::Expense, 10.0, "food".to_string(), None)
            .await
            .unwrap();
        service
            .update_transaction(
                &user.id,
                &tx.id,
                TransactionPatch {
                    date: Some(date),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    let transactions = service.list_transactions(&user.id).await.unwrap();
    let listed: Vec<_> = transactions.iter().map(|tx| tx.date).collect();
    assert_eq!(
        listed,
        vec![
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap(),
        ]
    );
}

#[tokio::test]
async fn test_update_applies_partial_patch() {
    let service = create_test_service();
    let user = register_test_user(&service, "Alice", "alice@example.com").await;

    let tx = service
        .add_transaction(
            &user.id,
            TransactionKind::Income,
            100.0,
            "salary".to_string(),
            Some("July paycheck".to_string()),
        )
        .await
        .unwrap();

    let updated = service
        .update_transaction(
            &user.id,
            &tx.id,
            TransactionPatch {
                kind: Some(TransactionKind::Expense),
                amount: Some(25.0),
                category: Some("food".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.kind, TransactionKind::Expense);
    assert_eq!(updated.amount, 25.0);
    assert_eq!(updated.category, "food");
    // Untouched fields survive the patch
    assert_eq!(updated.description.as_deref(), Some("July paycheck"));
    assert_eq!(updated.date, tx.date);

    let result = service
        .update_transaction(
            &user.id,
            &tx.id,
            TransactionPatch {
                amount: Some(-1.0),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(BudgetError::InvalidInput(_, _))));
}

#[tokio::test]
async fn test_update_is_not_budget_checked() {
    let service = create_test_service();
    let user = register_test_user(&service, "Alice", "alice@example.com").await;
    service.set_budget(&user.id, 50.0).await.unwrap();

    let tx = service
        .add_transaction(&user.id, TransactionKind::Expense, 40.0, "food".to_string(), None)
        .await
        .unwrap();

    // Known limitation: a patch may push the total past the ceiling
    let updated = service
        .update_transaction(
            &user.id,
            &tx.id,
            TransactionPatch {
                amount: Some(500.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.amount, 500.0);
}

#[tokio::test]
async fn test_delete_is_not_idempotent() {
    let service = create_test_service();
    let user = register_test_user(&service, "Alice", "alice@example.com").await;

    let tx = service
        .add_transaction(&user.id, TransactionKind::Expense, 10.0, "food".to_string(), None)
        .await
        .unwrap();

    service.delete_transaction(&user.id, &tx.id).await.unwrap();

    let result = service.get_transaction(&user.id, &tx.id).await;
    assert!(matches!(result, Err(BudgetError::TransactionNotFound(_))));

    let result = service.delete_transaction(&user.id, &tx.id).await;
    assert!(matches!(result, Err(BudgetError::TransactionNotFound(_))));
}
