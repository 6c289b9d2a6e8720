//! Relational repository backend on SeaORM.
//!
//! Single-statement operations rely on the engine's statement atomicity;
//! read-then-write operations run inside one transaction per call.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, ModelTrait, NotSet, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};

use super::entities::{category, product};
use super::{CategoryRepository, ProductRepository};
use crate::domain::{Category, CategoryDraft, Product, ProductDraft};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::clock::Clock;

/// Map a unique-index violation to a `Conflict` naming the offending key.
fn on_unique(err: DbErr, conflict: impl FnOnce() -> AppError) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => conflict(),
        _ => AppError::from(err),
    }
}

/// Translate product write failures: SKU index and category foreign key.
fn product_write_error(err: DbErr, sku: &str, category_id: Option<i32>) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::conflict(format!("Product with SKU '{}'", sku))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => match category_id {
            Some(id) => AppError::invalid_argument(format!("category {} does not exist", id)),
            None => AppError::from(err),
        },
        _ => AppError::from(err),
    }
}

/// Escape LIKE wildcards so the fragment matches literally.
fn like_pattern(fragment: &str) -> LikeExpr {
    let escaped = fragment
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    LikeExpr::new(format!("%{}%", escaped)).escape('\\')
}

/// Repository backed by a relational database.
#[derive(Clone)]
pub struct SqlStore {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

impl SqlStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    async fn find_products(
        &self,
        condition: sea_orm::Condition,
    ) -> AppResult<Vec<Product>> {
        let models = product::Entity::find()
            .filter(condition)
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Product::from).collect())
    }
}

#[async_trait]
impl ProductRepository for SqlStore {
    async fn add(&self, draft: ProductDraft) -> AppResult<Product> {
        let now = self.clock.now();
        let (sku, category_id) = (draft.sku.clone(), draft.category_id);
        let active_model = product::ActiveModel {
            id: NotSet,
            name: Set(draft.name),
            description: Set(draft.description),
            sku: Set(draft.sku),
            price: Set(draft.price),
            quantity_in_stock: Set(draft.quantity_in_stock),
            category_id: Set(draft.category_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| product_write_error(e, &sku, category_id))?;

        tracing::debug!(product_id = model.id, sku = %model.sku, "Product inserted");
        Ok(Product::from(model))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Product> {
        product::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Product::from)
            .ok_or_not_found(|| format!("Product {}", id))
    }

    async fn get_all(&self) -> AppResult<Vec<Product>> {
        self.find_products(sea_orm::Condition::all()).await
    }

    async fn update(&self, id: i32, draft: ProductDraft) -> AppResult<Product> {
        let txn = self.db.begin().await?;

        let existing = product::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_not_found(|| format!("Product {}", id))?;

        let created_at = existing.created_at;
        let (sku, category_id) = (draft.sku.clone(), draft.category_id);
        let mut active: product::ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.description = Set(draft.description);
        active.sku = Set(draft.sku);
        active.price = Set(draft.price);
        active.quantity_in_stock = Set(draft.quantity_in_stock);
        active.category_id = Set(draft.category_id);
        active.updated_at = Set(self.clock.now().max(created_at));

        let model = active
            .update(&txn)
            .await
            .map_err(|e| product_write_error(e, &sku, category_id))?;
        txn.commit().await?;

        Ok(Product::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = product::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("Product {}", id)));
        }

        tracing::debug!(product_id = id, "Product deleted");
        Ok(())
    }

    async fn get_by_sku(&self, sku: &str) -> AppResult<Product> {
        product::Entity::find()
            .filter(product::Column::Sku.eq(sku))
            .one(&self.db)
            .await?
            .map(Product::from)
            .ok_or_not_found(|| format!("Product with SKU '{}'", sku))
    }

    async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<Product>> {
        if self.db.get_database_backend() == DbBackend::Sqlite {
            // SQLite LOWER() folds ASCII only; fold in Rust like the in-memory store
            let products = self.find_products(sea_orm::Condition::all()).await?;
            return Ok(products
                .into_iter()
                .filter(|p| p.name_contains(fragment))
                .collect());
        }

        // LOWER() on both sides: LIKE is case-sensitive on PostgreSQL
        let condition = sea_orm::Condition::all().add(
            Expr::expr(Func::lower(Expr::col((product::Entity, product::Column::Name))))
                .like(like_pattern(fragment)),
        );
        self.find_products(condition).await
    }

    async fn get_by_price_range(&self, min: Decimal, max: Decimal) -> AppResult<Vec<Product>> {
        if min > max {
            return Err(AppError::invalid_argument(format!(
                "min price {} is greater than max price {}",
                min, max
            )));
        }
        let condition = sea_orm::Condition::all().add(product::Column::Price.between(min, max));
        self.find_products(condition).await
    }

    async fn get_by_category(&self, category_id: i32) -> AppResult<Vec<Product>> {
        let condition =
            sea_orm::Condition::all().add(product::Column::CategoryId.eq(category_id));
        self.find_products(condition).await
    }
}

#[async_trait]
impl CategoryRepository for SqlStore {
    async fn add(&self, draft: CategoryDraft) -> AppResult<Category> {
        let now = self.clock.now();
        let name = draft.name.clone();
        let active_model = category::ActiveModel {
            id: NotSet,
            name: Set(draft.name),
            description: Set(draft.description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| on_unique(e, || AppError::conflict(format!("Category '{}'", name))))?;

        Ok(Category::from(model))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Category> {
        category::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Category::from)
            .ok_or_not_found(|| format!("Category {}", id))
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Category> {
        category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await?
            .map(Category::from)
            .ok_or_not_found(|| format!("Category '{}'", name))
    }

    async fn get_all(&self) -> AppResult<Vec<Category>> {
        let models = category::Entity::find()
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Category::from).collect())
    }

    async fn update(&self, id: i32, draft: CategoryDraft) -> AppResult<Category> {
        let txn = self.db.begin().await?;

        let existing = category::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_not_found(|| format!("Category {}", id))?;

        let created_at = existing.created_at;
        let name = draft.name.clone();
        let mut active: category::ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.description = Set(draft.description);
        active.updated_at = Set(self.clock.now().max(created_at));

        let model = active
            .update(&txn)
            .await
            .map_err(|e| on_unique(e, || AppError::conflict(format!("Category '{}'", name))))?;
        txn.commit().await?;

        Ok(Category::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;

        let existing = category::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_not_found(|| format!("Category {}", id))?;

        // ON DELETE SET NULL clears product references in the same statement
        existing.delete(&txn).await?;
        txn.commit().await?;

        tracing::debug!(category_id = id, "Category deleted");
        Ok(())
    }
}
