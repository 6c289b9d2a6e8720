//! Storage-agnostic category repository contract.

use async_trait::async_trait;

use crate::domain::{Category, CategoryDraft};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Category repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Persist a new category; `Conflict` on a duplicate name.
    async fn add(&self, draft: CategoryDraft) -> AppResult<Category>;

    async fn get_by_id(&self, id: i32) -> AppResult<Category>;

    /// Exact name match
    async fn get_by_name(&self, name: &str) -> AppResult<Category>;

    async fn get_all(&self) -> AppResult<Vec<Category>>;

    async fn update(&self, id: i32, draft: CategoryDraft) -> AppResult<Category>;

    /// Remove a category and clear `category_id` on the products that
    /// referenced it. Products themselves are kept.
    async fn delete(&self, id: i32) -> AppResult<()>;
}
