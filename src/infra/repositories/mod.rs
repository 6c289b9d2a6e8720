//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! Two backends implement both contracts: [`InMemoryStore`] and [`SqlStore`].

mod category_repository;
pub(crate) mod entities;
mod memory;
mod product_repository;
mod sql;

pub use category_repository::CategoryRepository;
pub use memory::InMemoryStore;
pub use product_repository::ProductRepository;
pub use sql::SqlStore;

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use category_repository::MockCategoryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
