//! Storage backend selection.
//!
//! The backend is chosen once at startup; the rest of the application only
//! sees the repository trait objects handed out here.

use std::sync::Arc;

use super::clock::{Clock, SystemClock};
use super::db::Database;
use super::repositories::{CategoryRepository, InMemoryStore, ProductRepository, SqlStore};
use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Which backend a [`Storage`] was built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    InMemory,
    Relational,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::InMemory => "in-memory",
            Backend::Relational => "relational",
        }
    }
}

/// Owned handle to the selected repositories.
#[derive(Clone)]
pub struct Storage {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
    database: Option<Database>,
}

impl Storage {
    /// Fresh in-memory storage
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(InMemoryStore::new(clock));
        Self {
            products: store.clone(),
            categories: store,
            database: None,
        }
    }

    /// Storage on an already connected (and migrated) database
    pub fn relational(database: Database, clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(SqlStore::new(database.get_connection(), clock));
        Self {
            products: store.clone(),
            categories: store,
            database: Some(database),
        }
    }

    /// Build the backend named by the configuration, using the system clock.
    pub async fn from_config(config: &Config) -> AppResult<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        if config.use_in_memory_database {
            tracing::info!("Using in-memory storage");
            return Ok(Self::in_memory(clock));
        }

        let database = Database::connect(&config.database_url)
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("database connection failed: {}", e)))?;
        tracing::info!("Using relational storage");

        Ok(Self::relational(database, clock))
    }

    pub fn products(&self) -> Arc<dyn ProductRepository> {
        self.products.clone()
    }

    pub fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.categories.clone()
    }

    pub fn backend(&self) -> Backend {
        match self.database {
            Some(_) => Backend::Relational,
            None => Backend::InMemory,
        }
    }

    /// Check that the backend can serve requests.
    pub async fn ping(&self) -> AppResult<()> {
        match &self.database {
            Some(db) => db
                .ping()
                .await
                .map_err(|e| AppError::StorageUnavailable(e.to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_from_config() {
        let storage = Storage::from_config(&Config::in_memory()).await.unwrap();
        assert_eq!(storage.backend(), Backend::InMemory);
        assert!(storage.ping().await.is_ok());
        assert!(storage.products().get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_products_and_categories_share_state() {
        let storage = Storage::in_memory(Arc::new(SystemClock));
        let category = storage
            .categories()
            .add(crate::domain::CategoryDraft {
                name: "Tools".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let product = storage
            .products()
            .add(crate::domain::ProductDraft {
                name: "Hammer".to_string(),
                description: None,
                sku: "HAM-1".to_string(),
                price: rust_decimal::Decimal::new(1500, 2),
                quantity_in_stock: 3,
                category_id: Some(category.id),
            })
            .await
            .unwrap();

        storage.categories().delete(category.id).await.unwrap();
        let reloaded = storage.products().get_by_id(product.id).await.unwrap();
        assert_eq!(reloaded.category_id, None);
    }

    #[tokio::test]
    async fn test_relational_from_sqlite_config() {
        let config = Config {
            use_in_memory_database: false,
            database_url: "sqlite::memory:".to_string(),
            ..Config::default()
        };
        let storage = Storage::from_config(&config).await.unwrap();
        assert_eq!(storage.backend(), Backend::Relational);
        assert!(storage.ping().await.is_ok());
    }
}
