//! Product handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::{ApiPath, ApiQuery, ValidatedJson};
use crate::api::AppState;
use crate::domain::{ProductPayload, ProductResponse};
use crate::errors::AppResult;

/// Name search query
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring of the product name
    pub name: String,
}

/// Inclusive price bounds
#[derive(Debug, Deserialize, IntoParams)]
pub struct PriceRangeQuery {
    /// Lower bound
    #[param(value_type = f64, example = 5.0)]
    pub min: Decimal,
    /// Upper bound, not below `min`
    #[param(value_type = f64, example = 20.0)]
    pub max: Decimal,
}

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route("/price-range", get(products_in_price_range))
        .route("/sku/:sku", get(get_product_by_sku))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// List all products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "All products ordered by id", body = Vec<ProductResponse>)
    )
)]
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<ProductResponse>>> {
    let products = state.services().products().list_products().await?;
    Ok(Json(products))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation error or unknown category"),
        (status = 409, description = "SKU already in use")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ProductPayload>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    let product = state.services().products().create_product(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.services().products().get_product(id).await?;
    Ok(Json(product))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Validation error or unknown category"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "SKU already in use")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<ProductPayload>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.services().products().update_product(id, payload).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    state.services().products().delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get a product by SKU
#[utoipa::path(
    get,
    path = "/api/products/sku/{sku}",
    tag = "Products",
    params(("sku" = String, Path, description = "Exact SKU")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "No product has this SKU")
    )
)]
pub async fn get_product_by_sku(
    State(state): State<AppState>,
    ApiPath(sku): ApiPath<String>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.services().products().get_product_by_sku(&sku).await?;
    Ok(Json(product))
}

/// Search products by name
#[utoipa::path(
    get,
    path = "/api/products/search",
    tag = "Products",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching products, possibly none", body = Vec<ProductResponse>)
    )
)]
pub async fn search_products(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> AppResult<Json<Vec<ProductResponse>>> {
    let products = state.services().products().search_products(&query.name).await?;
    Ok(Json(products))
}

/// List products within a price range
#[utoipa::path(
    get,
    path = "/api/products/price-range",
    tag = "Products",
    params(PriceRangeQuery),
    responses(
        (status = 200, description = "Products priced within the bounds", body = Vec<ProductResponse>),
        (status = 400, description = "min is greater than max")
    )
)]
pub async fn products_in_price_range(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PriceRangeQuery>,
) -> AppResult<Json<Vec<ProductResponse>>> {
    let products = state
        .services()
        .products()
        .products_in_price_range(query.min, query.max)
        .await?;
    Ok(Json(products))
}
