//! Application services layer - Use cases and business logic.
//!
//! Services validate request DTOs, enforce cross-entity rules and map
//! entities to response DTOs. They depend on the repository traits only.

mod category_service;
pub mod container;
mod product_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use category_service::{CategoryManager, CategoryService};
pub use product_service::{ProductManager, ProductService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use category_service::MockCategoryService;
#[cfg(any(test, feature = "test-utils"))]
pub use product_service::MockProductService;
