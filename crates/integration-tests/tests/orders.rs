//! Integration tests for the order ledger.
//!
//! These tests require:
//! - A running `PostgreSQL` database pointed at by `DATABASE_URL`
//!
//! Run with: cargo test -p kirana-integration-tests -- --ignored

use rust_decimal::Decimal;
use serde_json::json;

use kirana_core::OrderStatus;
use kirana_integration_tests::{test_pool, unique_suffix};
use kirana_server::db::{OrderRepository, RepositoryError, orders::NewOrder};

fn sample_order(mobile: &str) -> NewOrder {
    NewOrder {
        customer_name: "Test Customer".to_owned(),
        mobile: mobile.to_owned(),
        address: "12 Test Lane".to_owned(),
        items: json!([
            {"product": "चावल (Rice) - 1kg", "qty": 2, "price": "60"},
            {"product": "नमक (Salt) - 1kg", "qty": 1, "price": "25"},
        ]),
        total: Decimal::new(145, 0),
        payment_method: "cod".to_owned(),
    }
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_order_ids_strictly_increase() {
    let pool = test_pool().await;
    let repo = OrderRepository::new(&pool);
    let mobile = format!("90000-{}", unique_suffix());

    let first = repo.create(sample_order(&mobile)).await.expect("create");
    let second = repo.create(sample_order(&mobile)).await.expect("create");

    assert!(second.as_i32() > first.as_i32());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_order_items_and_total_stored_verbatim() {
    let pool = test_pool().await;
    let repo = OrderRepository::new(&pool);
    let mobile = format!("90001-{}", unique_suffix());

    let new_order = sample_order(&mobile);
    let expected_items = new_order.items.clone();
    let id = repo.create(new_order).await.expect("create");

    let order = repo
        .get_by_id(id)
        .await
        .expect("get")
        .expect("order exists");

    assert_eq!(order.items, expected_items);
    assert_eq!(order.total, Decimal::new(145, 0));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_method, "cod");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_list_by_mobile_returns_only_matching_orders() {
    let pool = test_pool().await;
    let repo = OrderRepository::new(&pool);
    let mine = format!("90002-{}", unique_suffix());
    let other = format!("90003-{}", unique_suffix());

    repo.create(sample_order(&mine)).await.expect("create");
    repo.create(sample_order(&mine)).await.expect("create");
    repo.create(sample_order(&other)).await.expect("create");

    let orders = repo.list_by_mobile(&mine).await.expect("list");
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().all(|o| o.mobile == mine));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_status_update_is_idempotent() {
    let pool = test_pool().await;
    let repo = OrderRepository::new(&pool);
    let mobile = format!("90004-{}", unique_suffix());

    let id = repo.create(sample_order(&mobile)).await.expect("create");

    repo.update_status(id, OrderStatus::Delivered)
        .await
        .expect("first update");
    repo.update_status(id, OrderStatus::Delivered)
        .await
        .expect("repeated update");

    let order = repo.get_by_id(id).await.expect("get").expect("exists");
    assert_eq!(order.status, OrderStatus::Delivered);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_any_to_any_status_transition() {
    let pool = test_pool().await;
    let repo = OrderRepository::new(&pool);
    let mobile = format!("90005-{}", unique_suffix());

    let id = repo.create(sample_order(&mobile)).await.expect("create");

    // Delivered back to pending is allowed; there is no transition graph
    repo.update_status(id, OrderStatus::Delivered)
        .await
        .expect("to delivered");
    repo.update_status(id, OrderStatus::Pending)
        .await
        .expect("back to pending");

    let order = repo.get_by_id(id).await.expect("get").expect("exists");
    assert_eq!(order.status, OrderStatus::Pending);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_update_unknown_order_is_not_found() {
    let pool = test_pool().await;
    let repo = OrderRepository::new(&pool);

    let result = repo
        .update_status(kirana_core::OrderId::new(i32::MAX), OrderStatus::Cancelled)
        .await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_delete_removes_order() {
    let pool = test_pool().await;
    let repo = OrderRepository::new(&pool);
    let mobile = format!("90006-{}", unique_suffix());

    let id = repo.create(sample_order(&mobile)).await.expect("create");
    repo.delete(id).await.expect("delete");

    assert!(repo.get_by_id(id).await.expect("get").is_none());
    assert!(matches!(
        repo.delete(id).await,
        Err(RepositoryError::NotFound)
    ));
}
