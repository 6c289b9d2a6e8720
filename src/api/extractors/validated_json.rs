//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// JSON body extractor that rejects payloads failing their `Validate` rules.
///
/// Malformed JSON and constraint violations both surface as
/// `VALIDATION_ERROR` (400) with the messages declared on the payload type.
///
/// ```rust,ignore
/// async fn create(ValidatedJson(payload): ValidatedJson<ProductPayload>) {
///     // payload.sku is 3-50 characters here
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::from_validation(&e))?;

        Ok(ValidatedJson(value))
    }
}
