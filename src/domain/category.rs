//! Category domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Category domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable fields of a category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
}

impl Category {
    pub fn from_draft(id: i32, draft: CategoryDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, draft: CategoryDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.description = draft.description;
        self.updated_at = now.max(self.created_at);
    }
}

/// Category create/replace request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CategoryPayload {
    /// Category name, unique across all categories
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    #[schema(example = "Hardware", min_length = 1, max_length = 100)]
    pub name: String,
    /// Optional description
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    #[schema(example = "Tools and fasteners", max_length = 500)]
    pub description: Option<String>,
}

impl From<CategoryPayload> for CategoryDraft {
    fn from(payload: CategoryPayload) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
        }
    }
}

/// Category response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Hardware")]
    pub name: String,
    #[schema(example = "Tools and fasteners")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}
