//! Category service - Category CRUD and category-scoped product listing.

use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

use crate::domain::{CategoryDraft, CategoryPayload, CategoryResponse, ProductResponse};
use crate::errors::{AppError, AppResult};
use crate::infra::{CategoryRepository, ProductRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Category service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn create_category(&self, payload: CategoryPayload) -> AppResult<CategoryResponse>;

    async fn get_category(&self, id: i32) -> AppResult<CategoryResponse>;

    async fn list_categories(&self) -> AppResult<Vec<CategoryResponse>>;

    async fn update_category(
        &self,
        id: i32,
        payload: CategoryPayload,
    ) -> AppResult<CategoryResponse>;

    /// Delete a category; products that referenced it keep existing uncategorized.
    async fn delete_category(&self, id: i32) -> AppResult<()>;

    /// Products referencing the category. `NotFound` if the category is missing.
    async fn category_products(&self, id: i32) -> AppResult<Vec<ProductResponse>>;
}

/// Concrete implementation of CategoryService
pub struct CategoryManager {
    categories: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CategoryManager {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            categories,
            products,
        }
    }

    async fn checked_draft(
        &self,
        payload: CategoryPayload,
        current_id: Option<i32>,
    ) -> AppResult<CategoryDraft> {
        payload
            .validate()
            .map_err(|e| AppError::from_validation(&e))?;

        match self.categories.get_by_name(&payload.name).await {
            Ok(existing) if Some(existing.id) != current_id => {
                Err(AppError::conflict(format!("Category '{}'", payload.name)))
            }
            Ok(_) | Err(AppError::NotFound(_)) => Ok(payload.into()),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl CategoryService for CategoryManager {
    async fn create_category(&self, payload: CategoryPayload) -> AppResult<CategoryResponse> {
        let draft = self.checked_draft(payload, None).await?;
        let category = self.categories.add(draft).await?;

        tracing::info!(category_id = category.id, name = %category.name, "Category created");
        Ok(category.into())
    }

    async fn get_category(&self, id: i32) -> AppResult<CategoryResponse> {
        self.categories.get_by_id(id).await.map(Into::into)
    }

    async fn list_categories(&self) -> AppResult<Vec<CategoryResponse>> {
        let categories = self.categories.get_all().await?;
        Ok(categories.into_iter().map(CategoryResponse::from).collect())
    }

    async fn update_category(
        &self,
        id: i32,
        payload: CategoryPayload,
    ) -> AppResult<CategoryResponse> {
        let draft = self.checked_draft(payload, Some(id)).await?;
        let category = self.categories.update(id, draft).await?;

        tracing::info!(category_id = id, "Category updated");
        Ok(category.into())
    }

    async fn delete_category(&self, id: i32) -> AppResult<()> {
        self.categories.delete(id).await?;
        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }

    async fn category_products(&self, id: i32) -> AppResult<Vec<ProductResponse>> {
        // An empty list must mean "no products", not "no such category"
        self.categories.get_by_id(id).await?;

        let products = self.products.get_by_category(id).await?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }
}
