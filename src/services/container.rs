//! Service Container - Centralized service access.
//!
//! Handlers depend on the `ServiceContainer` trait, not on the concrete
//! managers, so the transport layer can be tested against mocks.

use std::sync::Arc;

use super::{CategoryManager, CategoryService, ProductManager, ProductService};
use crate::infra::Storage;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get product service
    fn products(&self) -> Arc<dyn ProductService>;

    /// Get category service
    fn categories(&self) -> Arc<dyn CategoryService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    product_service: Arc<dyn ProductService>,
    category_service: Arc<dyn CategoryService>,
}

impl Services {
    pub fn new(
        product_service: Arc<dyn ProductService>,
        category_service: Arc<dyn CategoryService>,
    ) -> Self {
        Self {
            product_service,
            category_service,
        }
    }

    /// Wire every service onto the repositories of the selected backend
    pub fn from_storage(storage: &Storage) -> Self {
        Self::new(
            Arc::new(ProductManager::new(storage.products(), storage.categories())),
            Arc::new(CategoryManager::new(storage.categories(), storage.products())),
        )
    }
}

impl ServiceContainer for Services {
    fn products(&self) -> Arc<dyn ProductService> {
        self.product_service.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryService> {
        self.category_service.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryPayload, ProductPayload};
    use crate::infra::SystemClock;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_services_share_one_backend() {
        let storage = Storage::in_memory(Arc::new(SystemClock));
        let services = Services::from_storage(&storage);

        let category = services
            .categories()
            .create_category(CategoryPayload {
                name: "Tools".to_string(),
                description: None,
            })
            .await
            .unwrap();

        services
            .products()
            .create_product(ProductPayload {
                name: "Hammer".to_string(),
                description: None,
                sku: "HAM-001".to_string(),
                price: Decimal::new(1999, 2),
                quantity_in_stock: 4,
                category_id: Some(category.id),
            })
            .await
            .unwrap();

        let listed = services
            .categories()
            .category_products(category.id)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].sku, "HAM-001");
    }
}
