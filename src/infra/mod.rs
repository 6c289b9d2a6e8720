//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repository backends (in-memory and relational)
//! - Storage backend selection
//! - The time source used for entity timestamps

pub mod clock;
pub mod db;
pub mod repositories;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use db::{Database, Migrator};
pub use repositories::{CategoryRepository, InMemoryStore, ProductRepository, SqlStore};
pub use storage::{Backend, Storage};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockCategoryRepository, MockProductRepository};
