//! Inventory API - Product and category management over swappable storage
//!
//! A CRUD web API over products with an optional category relation,
//! backed by either an in-memory store or a relational database.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and request/response DTOs
//! - **services**: Validation, cross-entity rules and DTO mapping
//! - **infra**: Clock, repositories, database and backend selection
//! - **api**: HTTP handlers, routes and OpenAPI document
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server on the in-memory store
//! cargo run -- serve --in-memory
//!
//! # Run migrations against DATABASE_URL
//! cargo run -- migrate up
//!
//! # Export the OpenAPI document
//! cargo run -- openapi --output openapi.json
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Category, Product};
pub use errors::{AppError, AppResult};
pub use infra::Storage;
