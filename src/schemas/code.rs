use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{product, redemption_code};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCodeRequest {
    /// Explicit code (`XXXX-XXXX-XXXX`); generated when omitted
    pub code: Option<String>,
    pub product_ids: Vec<i64>,
    pub scheduled_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_test_code: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCodeRequest {
    pub is_active: bool,
}

/// Product summary shown in the admin code listing
#[derive(Debug, Clone, Serialize)]
pub struct BundledProduct {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub discounted_price: Option<Decimal>,
}

impl From<product::Model> for BundledProduct {
    fn from(product: product::Model) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            discounted_price: product.discounted_price,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CodeResponse {
    pub id: i64,
    pub code: String,
    pub is_active: bool,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub claimed_at: Option<DateTime<Utc>>,
    pub claimed_by_username: Option<String>,
    pub is_test_code: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub products: Vec<BundledProduct>,
}

impl CodeResponse {
    pub fn from_code_with_products(
        code: redemption_code::Model,
        products: Vec<product::Model>,
    ) -> Self {
        Self {
            id: code.id,
            code: code.code,
            is_active: code.is_active,
            scheduled_start: code.scheduled_start,
            claimed_at: code.claimed_at,
            claimed_by_username: code.claimed_by_username,
            is_test_code: code.is_test_code,
            created_by: code.created_by,
            created_at: code.created_at,
            products: products.into_iter().map(BundledProduct::from).collect(),
        }
    }
}
