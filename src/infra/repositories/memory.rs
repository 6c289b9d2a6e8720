//! In-memory repository backend.
//!
//! Products and categories live in one owned state behind a single async
//! `RwLock`, so the category-deletion rule can clear product references
//! atomically. Reads share the lock; every read-modify-write sequence holds
//! the write guard for its whole duration.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::{CategoryRepository, ProductRepository};
use crate::domain::{Category, CategoryDraft, Product, ProductDraft};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::clock::Clock;

#[derive(Debug, Default)]
struct MemoryState {
    products: BTreeMap<i32, Product>,
    categories: BTreeMap<i32, Category>,
    // Last issued ids; never decremented, so deleted ids are not reused
    last_product_id: i32,
    last_category_id: i32,
}

impl MemoryState {
    fn sku_taken(&self, sku: &str, except: Option<i32>) -> bool {
        self.products
            .values()
            .any(|p| p.sku == sku && Some(p.id) != except)
    }

    fn category_name_taken(&self, name: &str, except: Option<i32>) -> bool {
        self.categories
            .values()
            .any(|c| c.name == name && Some(c.id) != except)
    }

    fn check_category_exists(&self, category_id: Option<i32>) -> AppResult<()> {
        match category_id {
            Some(id) if !self.categories.contains_key(&id) => Err(AppError::invalid_argument(
                format!("category {} does not exist", id),
            )),
            _ => Ok(()),
        }
    }
}

fn next_id(last: &mut i32, entity: &str) -> AppResult<i32> {
    let id = last
        .checked_add(1)
        .ok_or_else(|| AppError::internal(format!("{} id space exhausted", entity)))?;
    *last = id;
    Ok(id)
}

/// Process-local store for demos and tests. Nothing survives a restart.
#[derive(Clone)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    /// Create an empty, isolated store
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState::default())),
            clock,
        }
    }

    async fn filter_products(&self, keep: impl Fn(&Product) -> bool) -> Vec<Product> {
        let state = self.state.read().await;
        state.products.values().filter(|p| keep(*p)).cloned().collect()
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn add(&self, draft: ProductDraft) -> AppResult<Product> {
        let mut state = self.state.write().await;

        if state.sku_taken(&draft.sku, None) {
            return Err(AppError::conflict(format!("Product with SKU '{}'", draft.sku)));
        }
        state.check_category_exists(draft.category_id)?;

        let id = next_id(&mut state.last_product_id, "product")?;
        let product = Product::from_draft(id, draft, self.clock.now());
        state.products.insert(id, product.clone());

        tracing::debug!(product_id = id, sku = %product.sku, "Product stored in memory");
        Ok(product)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Product> {
        self.state
            .read()
            .await
            .products
            .get(&id)
            .cloned()
            .ok_or_not_found(|| format!("Product {}", id))
    }

    async fn get_all(&self) -> AppResult<Vec<Product>> {
        Ok(self.filter_products(|_| true).await)
    }

    async fn update(&self, id: i32, draft: ProductDraft) -> AppResult<Product> {
        let mut state = self.state.write().await;

        if !state.products.contains_key(&id) {
            return Err(AppError::not_found(format!("Product {}", id)));
        }
        if state.sku_taken(&draft.sku, Some(id)) {
            return Err(AppError::conflict(format!("Product with SKU '{}'", draft.sku)));
        }
        state.check_category_exists(draft.category_id)?;

        let now = self.clock.now();
        let product = state
            .products
            .get_mut(&id)
            .ok_or_not_found(|| format!("Product {}", id))?;
        product.apply(draft, now);
        Ok(product.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.state
            .write()
            .await
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or_not_found(|| format!("Product {}", id))
    }

    async fn get_by_sku(&self, sku: &str) -> AppResult<Product> {
        self.state
            .read()
            .await
            .products
            .values()
            .find(|p| p.sku == sku)
            .cloned()
            .ok_or_not_found(|| format!("Product with SKU '{}'", sku))
    }

    async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<Product>> {
        Ok(self.filter_products(|p| p.name_contains(fragment)).await)
    }

    async fn get_by_price_range(&self, min: Decimal, max: Decimal) -> AppResult<Vec<Product>> {
        if min > max {
            return Err(AppError::invalid_argument(format!(
                "min price {} is greater than max price {}",
                min, max
            )));
        }
        Ok(self.filter_products(|p| p.priced_between(min, max)).await)
    }

    async fn get_by_category(&self, category_id: i32) -> AppResult<Vec<Product>> {
        Ok(self
            .filter_products(|p| p.category_id == Some(category_id))
            .await)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn add(&self, draft: CategoryDraft) -> AppResult<Category> {
        let mut state = self.state.write().await;

        if state.category_name_taken(&draft.name, None) {
            return Err(AppError::conflict(format!("Category '{}'", draft.name)));
        }

        let id = next_id(&mut state.last_category_id, "category")?;
        let category = Category::from_draft(id, draft, self.clock.now());
        state.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Category> {
        self.state
            .read()
            .await
            .categories
            .get(&id)
            .cloned()
            .ok_or_not_found(|| format!("Category {}", id))
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Category> {
        self.state
            .read()
            .await
            .categories
            .values()
            .find(|c| c.name == name)
            .cloned()
            .ok_or_not_found(|| format!("Category '{}'", name))
    }

    async fn get_all(&self) -> AppResult<Vec<Category>> {
        Ok(self.state.read().await.categories.values().cloned().collect())
    }

    async fn update(&self, id: i32, draft: CategoryDraft) -> AppResult<Category> {
        let mut state = self.state.write().await;

        if !state.categories.contains_key(&id) {
            return Err(AppError::not_found(format!("Category {}", id)));
        }
        if state.category_name_taken(&draft.name, Some(id)) {
            return Err(AppError::conflict(format!("Category '{}'", draft.name)));
        }

        let now = self.clock.now();
        let category = state
            .categories
            .get_mut(&id)
            .ok_or_not_found(|| format!("Category {}", id))?;
        category.apply(draft, now);
        Ok(category.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut state = self.state.write().await;

        state
            .categories
            .remove(&id)
            .ok_or_not_found(|| format!("Category {}", id))?;

        // Same effect as ON DELETE SET NULL: the reference goes, the product stays
        let mut cleared = 0usize;
        for product in state.products.values_mut() {
            if product.category_id == Some(id) {
                product.category_id = None;
                cleared += 1;
            }
        }

        tracing::debug!(category_id = id, cleared, "Category removed from memory");
        Ok(())
    }
}
