//! Product domain entity and related types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::config::{PRICE_PRECISION, PRICE_SCALE};

/// Product domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub price: Decimal,
    pub quantity_in_stock: i32,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable fields of a product, used for both creation and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub price: Decimal,
    pub quantity_in_stock: i32,
    pub category_id: Option<i32>,
}

impl Product {
    /// Materialize a draft with a store-assigned identity.
    pub fn from_draft(id: i32, draft: ProductDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            sku: draft.sku,
            price: draft.price,
            quantity_in_stock: draft.quantity_in_stock,
            category_id: draft.category_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every mutable field and refresh `updated_at`.
    ///
    /// `updated_at` never moves before `created_at`, even if the clock does.
    pub fn apply(&mut self, draft: ProductDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.description = draft.description;
        self.sku = draft.sku;
        self.price = draft.price;
        self.quantity_in_stock = draft.quantity_in_stock;
        self.category_id = draft.category_id;
        self.updated_at = now.max(self.created_at);
    }

    /// Case-insensitive substring match on the name.
    pub fn name_contains(&self, fragment: &str) -> bool {
        self.name
            .to_lowercase()
            .contains(&fragment.to_lowercase())
    }

    /// Inclusive price range check.
    pub fn priced_between(&self, min: Decimal, max: Decimal) -> bool {
        self.price >= min && self.price <= max
    }
}

/// Largest price a DECIMAL(10,2) column can hold.
fn max_price() -> Decimal {
    // 10^(precision - scale) - 10^-scale
    let scale_unit = Decimal::new(1, PRICE_SCALE);
    Decimal::from(10u64.pow(PRICE_PRECISION - PRICE_SCALE)) - scale_unit
}

/// Price must be positive and fit DECIMAL(10,2).
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        let mut err = ValidationError::new("price_positive");
        err.message = Some("Price must be greater than 0".into());
        return Err(err);
    }
    if price.round_dp(PRICE_SCALE) != *price {
        let mut err = ValidationError::new("price_scale");
        err.message = Some("Price must have at most 2 decimal places".into());
        return Err(err);
    }
    if *price > max_price() {
        let mut err = ValidationError::new("price_range");
        err.message = Some("Price must be less than 100000000".into());
        return Err(err);
    }
    Ok(())
}

/// Product create/replace request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    /// Product display name
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    #[schema(example = "Widget", min_length = 1, max_length = 200)]
    pub name: String,
    /// Optional long description
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    #[schema(example = "A very useful widget", max_length = 1000)]
    pub description: Option<String>,
    /// Stock keeping unit, unique across all products
    #[validate(length(min = 3, max = 50, message = "SKU must be between 3 and 50 characters"))]
    #[schema(example = "SKU-001", min_length = 3, max_length = 50)]
    pub sku: String,
    /// Unit price, greater than 0 with at most 2 decimal places
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
    /// Units currently in stock
    #[validate(range(min = 0, message = "Quantity in stock cannot be negative"))]
    #[schema(example = 10, minimum = 0)]
    pub quantity_in_stock: i32,
    /// Optional category reference
    #[schema(example = 1)]
    pub category_id: Option<i32>,
}

impl From<ProductPayload> for ProductDraft {
    fn from(payload: ProductPayload) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
            sku: payload.sku,
            price: payload.price,
            quantity_in_stock: payload.quantity_in_stock,
            category_id: payload.category_id,
        }
    }
}

/// Product response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    /// Server-assigned identity
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Widget")]
    pub name: String,
    #[schema(example = "A very useful widget")]
    pub description: Option<String>,
    #[schema(example = "SKU-001")]
    pub sku: String,
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
    #[schema(example = 10)]
    pub quantity_in_stock: i32,
    #[schema(example = 1)]
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            sku: product.sku,
            price: product.price,
            quantity_in_stock: product.quantity_in_stock,
            category_id: product.category_id,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn payload() -> ProductPayload {
        ProductPayload {
            name: "Widget".to_string(),
            description: None,
            sku: "SKU-001".to_string(),
            price: Decimal::new(999, 2),
            quantity_in_stock: 10,
            category_id: None,
        }
    }

    #[test]
    fn test_valid_payload() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn test_rejects_field_constraints() {
        let mut p = payload();
        p.name = String::new();
        assert!(p.validate().is_err());

        let mut p = payload();
        p.sku = "AB".to_string();
        assert!(p.validate().is_err());

        let mut p = payload();
        p.sku = "X".repeat(51);
        assert!(p.validate().is_err());

        let mut p = payload();
        p.description = Some("d".repeat(1001));
        assert!(p.validate().is_err());

        let mut p = payload();
        p.quantity_in_stock = -1;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_price_rules() {
        assert!(validate_price(&Decimal::new(1, 2)).is_ok());
        assert!(validate_price(&Decimal::ZERO).is_err());
        assert!(validate_price(&Decimal::new(-500, 2)).is_err());
        assert!(validate_price(&Decimal::new(1999, 3)).is_err());
        assert!(validate_price(&Decimal::new(9_999_999_999, 2)).is_ok());
        assert!(validate_price(&Decimal::new(10_000_000_000, 2)).is_err());
    }

    #[test]
    fn test_apply_refreshes_updated_at() {
        let created = Utc::now();
        let mut product = Product::from_draft(1, payload().into(), created);
        assert_eq!(product.created_at, product.updated_at);

        let mut draft: ProductDraft = payload().into();
        draft.price = Decimal::new(1250, 2);
        product.apply(draft, created + Duration::seconds(5));

        assert_eq!(product.price, Decimal::new(1250, 2));
        assert_eq!(product.updated_at, created + Duration::seconds(5));
    }

    #[test]
    fn test_apply_never_moves_before_creation() {
        let created = Utc::now();
        let mut product = Product::from_draft(1, payload().into(), created);
        product.apply(payload().into(), created - Duration::hours(1));
        assert_eq!(product.updated_at, created);
    }

    #[test]
    fn test_name_contains_ignores_case() {
        let product = Product::from_draft(1, payload().into(), Utc::now());
        assert!(product.name_contains("wid"));
        assert!(product.name_contains("GET"));
        assert!(!product.name_contains("gadget"));
    }
}
