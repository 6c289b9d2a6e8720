//! OpenAPI documentation configuration.
//!
//! Served through Swagger UI and exported by the `openapi` command.

use utoipa::OpenApi;

use crate::api::handlers::{category_handler, product_handler};
use crate::domain::{CategoryPayload, CategoryResponse, ProductPayload, ProductResponse};

/// OpenAPI documentation for the Inventory API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory API",
        version = "0.1.0",
        description = "Product and category inventory management with swappable storage backends",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Product endpoints
        product_handler::list_products,
        product_handler::create_product,
        product_handler::get_product,
        product_handler::update_product,
        product_handler::delete_product,
        product_handler::get_product_by_sku,
        product_handler::search_products,
        product_handler::products_in_price_range,
        // Category endpoints
        category_handler::list_categories,
        category_handler::create_category,
        category_handler::get_category,
        category_handler::update_category,
        category_handler::delete_category,
        category_handler::category_products,
    ),
    components(
        schemas(
            ProductPayload,
            ProductResponse,
            CategoryPayload,
            CategoryResponse,
        )
    ),
    tags(
        (name = "Products", description = "Product inventory operations"),
        (name = "Categories", description = "Category management operations")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/products",
            "/api/products/{id}",
            "/api/products/sku/{sku}",
            "/api/products/search",
            "/api/products/price-range",
            "/api/categories",
            "/api/categories/{id}",
            "/api/categories/{id}/products",
        ] {
            assert!(paths.contains(&expected), "missing path {}", expected);
        }
    }
}
