//! Product service - Handles product-related business logic.
//!
//! Validates incoming payloads, enforces SKU uniqueness and category
//! existence, and maps entities to response DTOs.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use validator::Validate;

use crate::domain::{ProductDraft, ProductPayload, ProductResponse};
use crate::errors::{AppError, AppResult};
use crate::infra::{CategoryRepository, ProductRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn create_product(&self, payload: ProductPayload) -> AppResult<ProductResponse>;

    async fn get_product(&self, id: i32) -> AppResult<ProductResponse>;

    async fn list_products(&self) -> AppResult<Vec<ProductResponse>>;

    async fn get_product_by_sku(&self, sku: &str) -> AppResult<ProductResponse>;

    async fn search_products(&self, name: &str) -> AppResult<Vec<ProductResponse>>;

    async fn products_in_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> AppResult<Vec<ProductResponse>>;

    /// Replace every mutable field of an existing product
    async fn update_product(&self, id: i32, payload: ProductPayload) -> AppResult<ProductResponse>;

    async fn delete_product(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of ProductService over the repository contracts.
pub struct ProductManager {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ProductManager {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// Validate the payload and check the references it carries.
    ///
    /// `current_id` is the product being updated, whose own SKU is not a collision.
    async fn checked_draft(
        &self,
        payload: ProductPayload,
        current_id: Option<i32>,
    ) -> AppResult<ProductDraft> {
        payload
            .validate()
            .map_err(|e| AppError::from_validation(&e))?;

        match self.products.get_by_sku(&payload.sku).await {
            Ok(existing) if Some(existing.id) != current_id => {
                return Err(AppError::conflict(format!(
                    "Product with SKU '{}'",
                    payload.sku
                )));
            }
            Ok(_) | Err(AppError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        if let Some(category_id) = payload.category_id {
            match self.categories.get_by_id(category_id).await {
                Ok(_) => {}
                Err(AppError::NotFound(_)) => {
                    return Err(AppError::invalid_argument(format!(
                        "category {} does not exist",
                        category_id
                    )));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(payload.into())
    }
}

fn to_responses(products: Vec<crate::domain::Product>) -> Vec<ProductResponse> {
    products.into_iter().map(ProductResponse::from).collect()
}

#[async_trait]
impl ProductService for ProductManager {
    async fn create_product(&self, payload: ProductPayload) -> AppResult<ProductResponse> {
        let draft = self.checked_draft(payload, None).await?;
        let product = self.products.add(draft).await?;

        tracing::info!(product_id = product.id, sku = %product.sku, "Product created");
        Ok(product.into())
    }

    async fn get_product(&self, id: i32) -> AppResult<ProductResponse> {
        self.products.get_by_id(id).await.map(Into::into)
    }

    async fn list_products(&self) -> AppResult<Vec<ProductResponse>> {
        self.products.get_all().await.map(to_responses)
    }

    async fn get_product_by_sku(&self, sku: &str) -> AppResult<ProductResponse> {
        self.products.get_by_sku(sku).await.map(Into::into)
    }

    async fn search_products(&self, name: &str) -> AppResult<Vec<ProductResponse>> {
        self.products.search_by_name(name).await.map(to_responses)
    }

    async fn products_in_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> AppResult<Vec<ProductResponse>> {
        self.products
            .get_by_price_range(min, max)
            .await
            .map(to_responses)
    }

    async fn update_product(&self, id: i32, payload: ProductPayload) -> AppResult<ProductResponse> {
        let draft = self.checked_draft(payload, Some(id)).await?;
        let product = self.products.update(id, draft).await?;

        tracing::info!(product_id = id, "Product updated");
        Ok(product.into())
    }

    async fn delete_product(&self, id: i32) -> AppResult<()> {
        self.products.delete(id).await?;
        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }
}
