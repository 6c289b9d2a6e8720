//! Integration tests for the relational store.
//!
//! Each test opens its own in-memory SQLite database with all migrations
//! applied, so the schema constraints (unique indexes, foreign key with
//! `ON DELETE SET NULL`) are exercised for real.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use inventory_api::domain::{CategoryDraft, ProductDraft};
use inventory_api::errors::AppError;
use inventory_api::infra::{
    CategoryRepository, Clock, Database, InMemoryStore, ManualClock, ProductRepository,
    SqlStore,
};

// =============================================================================
// Test Helpers
// =============================================================================

async fn setup() -> (SqlStore, Arc<ManualClock>) {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("sqlite in-memory database should open");
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
    ));
    (SqlStore::new(db.get_connection(), clock.clone()), clock)
}

fn draft(name: &str, sku: &str, cents: i64) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        description: None,
        sku: sku.to_string(),
        price: Decimal::new(cents, 2),
        quantity_in_stock: 10,
        category_id: None,
    }
}

fn category(name: &str) -> CategoryDraft {
    CategoryDraft {
        name: name.to_string(),
        description: Some(format!("{} section", name)),
    }
}

// =============================================================================
// Product Repository
// =============================================================================

#[tokio::test]
async fn test_widget_scenario() {
    let (store, clock) = setup().await;
    let created_at = clock.now();

    let widget = ProductRepository::add(&store, draft("Widget", "SKU-001", 999))
        .await
        .unwrap();
    assert_eq!(widget.id, 1);
    assert_eq!(widget.price, Decimal::new(999, 2));
    assert_eq!(widget.created_at, created_at);
    assert_eq!(widget.updated_at, created_at);

    clock.advance(Duration::seconds(1));
    let updated = ProductRepository::update(&store, 1, draft("Widget", "SKU-001", 1250))
        .await
        .unwrap();
    assert_eq!(updated.price, Decimal::new(1250, 2));
    assert!(updated.updated_at > widget.updated_at);
    assert_eq!(updated.created_at, created_at);

    let dup = ProductRepository::add(&store, draft("Other", "SKU-001", 100)).await;
    assert!(matches!(dup, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_get_by_id_round_trips_fields() {
    let (store, _) = setup().await;
    let mut input = draft("Gadget", "GAD-001", 2500);
    input.description = Some("Shiny".to_string());
    input.quantity_in_stock = 0;

    let stored = ProductRepository::add(&store, input).await.unwrap();
    let fetched = ProductRepository::get_by_id(&store, stored.id).await.unwrap();

    assert_eq!(fetched, stored);
}

#[tokio::test]
async fn test_update_sku_collision() {
    let (store, _) = setup().await;
    ProductRepository::add(&store, draft("A", "SKU-A", 100)).await.unwrap();
    let b = ProductRepository::add(&store, draft("B", "SKU-B", 100)).await.unwrap();

    let result = ProductRepository::update(&store, b.id, draft("B", "SKU-A", 100)).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let result = ProductRepository::update(&store, 99, draft("C", "SKU-C", 100)).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_semantics() {
    let (store, _) = setup().await;
    let product = ProductRepository::add(&store, draft("Widget", "SKU-001", 999))
        .await
        .unwrap();

    ProductRepository::delete(&store, product.id).await.unwrap();

    let missing = ProductRepository::get_by_id(&store, product.id).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let again = ProductRepository::delete(&store, product.id).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_get_all_ordered_by_id() {
    let (store, _) = setup().await;
    for (name, sku) in [("C", "SKU-C"), ("A", "SKU-A"), ("B", "SKU-B")] {
        ProductRepository::add(&store, draft(name, sku, 100)).await.unwrap();
    }

    let ids: Vec<i32> = ProductRepository::get_all(&store)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_get_by_sku() {
    let (store, _) = setup().await;
    ProductRepository::add(&store, draft("Widget", "SKU-001", 999))
        .await
        .unwrap();

    let found = store.get_by_sku("SKU-001").await.unwrap();
    assert_eq!(found.name, "Widget");

    let missing = store.get_by_sku("SKU-404").await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_search_by_name_is_case_insensitive() {
    let (store, _) = setup().await;
    ProductRepository::add(&store, draft("Widget", "SKU-001", 999)).await.unwrap();
    ProductRepository::add(&store, draft("Gadget", "SKU-002", 999)).await.unwrap();
    ProductRepository::add(&store, draft("100% Widget_Pro", "SKU-003", 999))
        .await
        .unwrap();

    let found = store.search_by_name("wid").await.unwrap();
    assert_eq!(found.len(), 2);

    // Wildcards in the fragment match literally
    let found = store.search_by_name("%").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].sku, "SKU-003");

    assert!(store.search_by_name("nothing").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_folds_non_ascii_like_memory_store() {
    let (store, clock) = setup().await;
    let memory = InMemoryStore::new(clock);

    for (name, sku) in [("Éclair Deluxe", "ECL-001"), ("Crème Brûlée", "CRB-001")] {
        ProductRepository::add(&store, draft(name, sku, 450)).await.unwrap();
        ProductRepository::add(&memory, draft(name, sku, 450)).await.unwrap();
    }

    for fragment in ["éclair", "ÉCLAIR", "brûlée", "e"] {
        let relational: Vec<String> = store
            .search_by_name(fragment)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.sku)
            .collect();
        let in_memory: Vec<String> = memory
            .search_by_name(fragment)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.sku)
            .collect();
        assert_eq!(relational, in_memory, "fragment {:?}", fragment);
    }

    assert_eq!(store.search_by_name("éclair").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_price_range() {
    let (store, _) = setup().await;
    ProductRepository::add(&store, draft("Cheap", "SKU-001", 500)).await.unwrap();
    ProductRepository::add(&store, draft("Mid", "SKU-002", 999)).await.unwrap();
    ProductRepository::add(&store, draft("Dear", "SKU-003", 5000)).await.unwrap();

    let inclusive = store
        .get_by_price_range(Decimal::new(500, 2), Decimal::new(999, 2))
        .await
        .unwrap();
    assert_eq!(inclusive.len(), 2);

    let exact = store
        .get_by_price_range(Decimal::new(999, 2), Decimal::new(999, 2))
        .await
        .unwrap();
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].sku, "SKU-002");

    let inverted = store
        .get_by_price_range(Decimal::new(20, 0), Decimal::new(10, 0))
        .await;
    assert!(matches!(inverted, Err(AppError::InvalidArgument(_))));
}

// =============================================================================
// Category Repository
// =============================================================================

#[tokio::test]
async fn test_category_crud() {
    let (store, clock) = setup().await;

    let tools = CategoryRepository::add(&store, category("Tools")).await.unwrap();
    assert_eq!(tools.created_at, tools.updated_at);

    let by_name = store.get_by_name("Tools").await.unwrap();
    assert_eq!(by_name.id, tools.id);

    clock.advance(Duration::minutes(5));
    let renamed = CategoryRepository::update(&store, tools.id, category("Hardware"))
        .await
        .unwrap();
    assert_eq!(renamed.name, "Hardware");
    assert!(renamed.updated_at > renamed.created_at);

    let missing = store.get_by_name("Tools").await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_category_name_unique() {
    let (store, _) = setup().await;
    CategoryRepository::add(&store, category("Tools")).await.unwrap();
    let garden = CategoryRepository::add(&store, category("Garden")).await.unwrap();

    let dup = CategoryRepository::add(&store, category("Tools")).await;
    assert!(matches!(dup, Err(AppError::Conflict(_))));

    let rename = CategoryRepository::update(&store, garden.id, category("Tools")).await;
    assert!(matches!(rename, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_unknown_category_rejected() {
    let (store, _) = setup().await;
    let mut input = draft("Widget", "SKU-001", 999);
    input.category_id = Some(42);

    let result = ProductRepository::add(&store, input).await;
    assert!(matches!(result, Err(AppError::InvalidArgument(_))));
}

#[tokio::test]
async fn test_category_delete_clears_references() {
    let (store, _) = setup().await;
    let tools = CategoryRepository::add(&store, category("Tools")).await.unwrap();

    let mut hammer = draft("Hammer", "HAM-001", 1500);
    hammer.category_id = Some(tools.id);
    let hammer = ProductRepository::add(&store, hammer).await.unwrap();
    ProductRepository::add(&store, draft("Loose", "LSE-001", 100)).await.unwrap();

    let in_category = store.get_by_category(tools.id).await.unwrap();
    assert_eq!(in_category.len(), 1);
    assert_eq!(in_category[0].id, hammer.id);

    CategoryRepository::delete(&store, tools.id).await.unwrap();

    let reloaded = ProductRepository::get_by_id(&store, hammer.id).await.unwrap();
    assert_eq!(reloaded.category_id, None);
    assert_eq!(ProductRepository::get_all(&store).await.unwrap().len(), 2);

    let again = CategoryRepository::delete(&store, tools.id).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_ids_not_reused_after_delete() {
    let (store, _) = setup().await;
    let first = ProductRepository::add(&store, draft("A", "SKU-A", 100)).await.unwrap();
    let second = ProductRepository::add(&store, draft("B", "SKU-B", 100)).await.unwrap();
    ProductRepository::delete(&store, second.id).await.unwrap();

    let third = ProductRepository::add(&store, draft("C", "SKU-C", 100)).await.unwrap();
    assert!(third.id > second.id);
    assert!(third.id > first.id);
}
