//! Integration tests for the product catalog and shop settings.
//!
//! These tests require:
//! - A running `PostgreSQL` database pointed at by `DATABASE_URL`
//!
//! Run with: cargo test -p kirana-integration-tests -- --ignored

use rust_decimal::Decimal;

use kirana_integration_tests::{test_pool, unique_suffix};
use kirana_server::db::{ProductRepository, SettingsRepository};

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_new_product_is_available_by_default() {
    let pool = test_pool().await;
    let repo = ProductRepository::new(&pool);
    let name = format!("Test Rice {}", unique_suffix());

    let id = repo
        .create(&name, Decimal::new(60, 0), "default.png")
        .await
        .expect("create");

    let product = repo.get_by_id(id).await.expect("get").expect("exists");
    assert!(product.is_available);
    assert_eq!(product.price, Decimal::new(60, 0));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_toggle_availability_flips_and_returns_new_flag() {
    let pool = test_pool().await;
    let repo = ProductRepository::new(&pool);
    let name = format!("Test Oil {}", unique_suffix());

    let id = repo
        .create(&name, Decimal::new(180, 0), "default.png")
        .await
        .expect("create");

    let flag = repo.toggle_availability(id).await.expect("toggle");
    assert!(!flag);
    let flag = repo.toggle_availability(id).await.expect("toggle back");
    assert!(flag);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_unavailable_products_hidden_from_storefront_listing() {
    let pool = test_pool().await;
    let repo = ProductRepository::new(&pool);
    let name = format!("Hidden Soap {}", unique_suffix());

    let id = repo
        .create(&name, Decimal::new(35, 0), "default.png")
        .await
        .expect("create");
    repo.toggle_availability(id).await.expect("hide");

    let available = repo.list_available().await.expect("list");
    assert!(available.iter().all(|p| p.id != id));

    // Still present in the admin listing
    let all = repo.list_all().await.expect("list all");
    assert!(all.iter().any(|p| p.id == id));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_search_matches_name_substring_case_insensitively() {
    let pool = test_pool().await;
    let repo = ProductRepository::new(&pool);
    let marker = unique_suffix();
    let name = format!("Special Masala {marker}");

    repo.create(&name, Decimal::new(90, 0), "default.png")
        .await
        .expect("create");

    let found = repo.search(&marker.to_uppercase()).await.expect("search");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, name);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_edit_without_image_keeps_existing_image() {
    let pool = test_pool().await;
    let repo = ProductRepository::new(&pool);
    let name = format!("Test Tea {}", unique_suffix());

    let id = repo
        .create(&name, Decimal::new(80, 0), "tea.png")
        .await
        .expect("create");

    repo.update(id, &name, Decimal::new(85, 0), None)
        .await
        .expect("update");

    let product = repo.get_by_id(id).await.expect("get").expect("exists");
    assert_eq!(product.image, "tea.png");
    assert_eq!(product.price, Decimal::new(85, 0));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_settings_upsert_and_timings_fallback() {
    let pool = test_pool().await;
    let repo = SettingsRepository::new(&pool);

    repo.seed_defaults().await.expect("seed");

    repo.set("shop_open_time", "07:30").await.expect("set");
    repo.set("shop_open_time", "07:45").await.expect("overwrite");

    let timings = repo.shop_timings().await.expect("timings");
    assert_eq!(timings.open_time, "07:45");
    // Untouched keys keep their seeded defaults
    assert_eq!(timings.close_time, "21:00");
}
