//! Storage-agnostic product repository contract.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{Product, ProductDraft};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
///
/// Lookups signal absence with `AppError::NotFound`; listings are ordered by
/// ascending id.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Assign an identity and timestamps, then persist.
    ///
    /// Fails with `Conflict` when the SKU is taken and `InvalidArgument` when
    /// the referenced category does not exist.
    async fn add(&self, draft: ProductDraft) -> AppResult<Product>;

    async fn get_by_id(&self, id: i32) -> AppResult<Product>;

    async fn get_all(&self) -> AppResult<Vec<Product>>;

    /// Overwrite the mutable fields of an existing product and refresh `updated_at`.
    async fn update(&self, id: i32, draft: ProductDraft) -> AppResult<Product>;

    /// Remove a product; `NotFound` if it does not exist.
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Exact SKU match
    async fn get_by_sku(&self, sku: &str) -> AppResult<Product>;

    /// Case-insensitive substring match over the name
    async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<Product>>;

    /// Inclusive price filter; `InvalidArgument` when `min > max`
    async fn get_by_price_range(&self, min: Decimal, max: Decimal) -> AppResult<Vec<Product>>;

    /// Products referencing the given category
    async fn get_by_category(&self, category_id: i32) -> AppResult<Vec<Product>>;
}
