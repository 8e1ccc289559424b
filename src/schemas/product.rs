use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{category, product};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub details: Option<String>,
    pub price: Decimal,
    pub discounted_price: Option<Decimal>,
    pub category_id: Option<i64>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub details: Option<String>,
    pub price: Option<Decimal>,
    pub discounted_price: Option<Decimal>,
    /// Remove an existing discount; wins over `discounted_price`
    #[serde(default)]
    pub clear_discount: bool,
    pub category_id: Option<i64>,
    pub image_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<category::Model> for CategoryInfo {
    fn from(category: category::Model) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub details: Option<String>,
    pub price: Decimal,
    pub discounted_price: Option<Decimal>,
    pub category: Option<CategoryInfo>,
    pub image_url: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductResponse {
    pub fn from_product_with_category(
        product: product::Model,
        category: Option<category::Model>,
    ) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            details: product.details,
            price: product.price,
            discounted_price: product.discounted_price,
            category: category.map(CategoryInfo::from),
            image_url: product.image_url,
            sort_order: product.sort_order,
            is_active: product.is_active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
