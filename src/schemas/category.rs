use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::category;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Derived from the name when omitted
    pub slug: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub slug: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub product_count: u64,
}

impl CategoryResponse {
    pub fn from_category_with_count(category: category::Model, product_count: u64) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            sort_order: category.sort_order,
            created_at: category.created_at,
            product_count,
        }
    }
}
