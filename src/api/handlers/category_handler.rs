//! Category handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::{ApiPath, ValidatedJson};
use crate::api::AppState;
use crate::domain::{CategoryPayload, CategoryResponse, ProductResponse};
use crate::errors::AppResult;

/// Create category routes
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/:id/products", get(category_products))
}

/// List all categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "All categories ordered by id", body = Vec<CategoryResponse>)
    )
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategoryResponse>>> {
    let categories = state.services().categories().list_categories().await?;
    Ok(Json(categories))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Categories",
    request_body = CategoryPayload,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Name already in use")
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CategoryPayload>,
) -> AppResult<(StatusCode, Json<CategoryResponse>)> {
    let category = state.services().categories().create_category(payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "Categories",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<CategoryResponse>> {
    let category = state.services().categories().get_category(id).await?;
    Ok(Json(category))
}

/// Replace a category
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "Categories",
    params(("id" = i32, Path, description = "Category id")),
    request_body = CategoryPayload,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Name already in use")
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<CategoryPayload>,
) -> AppResult<Json<CategoryResponse>> {
    let category = state.services().categories().update_category(id, payload).await?;
    Ok(Json(category))
}

/// Delete a category; its products become uncategorized
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "Categories",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    state.services().categories().delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the products of a category
#[utoipa::path(
    get,
    path = "/api/categories/{id}/products",
    tag = "Categories",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Products in the category", body = Vec<ProductResponse>),
        (status = 404, description = "Category not found")
    )
)]
pub async fn category_products(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<Vec<ProductResponse>>> {
    let products = state.services().categories().category_products(id).await?;
    Ok(Json(products))
}
