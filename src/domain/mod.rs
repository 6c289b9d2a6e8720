//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod category;
pub mod product;

pub use category::{Category, CategoryDraft, CategoryPayload, CategoryResponse};
pub use product::{Product, ProductDraft, ProductPayload, ProductResponse};
