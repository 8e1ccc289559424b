use chrono::Utc;
use rand::Rng;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::db::DbConn;
use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::models::{code_product, product, redemption_code};

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CODE_SEGMENTS: usize = 3;
const SEGMENT_LEN: usize = 4;
const GENERATE_ATTEMPTS: usize = 5;

/// Uppercase a user-entered code for lookup; codes are stored uppercase
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Generate a code of the form `XXXX-XXXX-XXXX` over `A-Z0-9`
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_SEGMENTS)
        .map(|_| {
            (0..SEGMENT_LEN)
                .map(|_| CODE_CHARSET[rng.random_range(0..CODE_CHARSET.len())] as char)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Check the `XXXX-XXXX-XXXX` shape (after normalization)
pub fn is_valid_code_format(code: &str) -> bool {
    let segments: Vec<&str> = code.split('-').collect();
    segments.len() == CODE_SEGMENTS
        && segments.iter().all(|s| {
            s.len() == SEGMENT_LEN && s.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        })
}

pub struct CreateCodeParams {
    /// Explicit code; a fresh one is generated when None
    pub code: Option<String>,
    pub product_ids: Vec<i64>,
    pub scheduled_start: Option<chrono::DateTime<Utc>>,
    pub is_test_code: bool,
    pub created_by: String,
}

/// Create a redemption code with its immutable product bundle.
///
/// The bundle is fixed here; no other code path writes `code_products`.
pub async fn create_code(
    db: &DbConn,
    params: CreateCodeParams,
) -> Result<(redemption_code::Model, Vec<product::Model>)> {
    if params.product_ids.is_empty() {
        return Err(AppError::BadRequest(
            "A code must grant at least one product".to_string(),
        ));
    }

    let products = Product::find()
        .filter(product::Column::Id.is_in(params.product_ids.clone()))
        .all(db)
        .await?;
    if products.len() != params.product_ids.len() {
        return Err(AppError::BadRequest(
            "One or more product ids do not exist".to_string(),
        ));
    }

    let code_value = match params.code {
        Some(raw) => {
            let normalized = normalize_code(&raw);
            if !is_valid_code_format(&normalized) {
                return Err(AppError::BadRequest(
                    "Code must have the form XXXX-XXXX-XXXX over A-Z and 0-9".to_string(),
                ));
            }
            if find_by_code(db, &normalized).await?.is_some() {
                return Err(AppError::Conflict("Code already exists".to_string()));
            }
            normalized
        }
        None => {
            let mut generated = None;
            for _ in 0..GENERATE_ATTEMPTS {
                let candidate = generate_code();
                if find_by_code(db, &candidate).await?.is_none() {
                    generated = Some(candidate);
                    break;
                }
            }
            generated.ok_or_else(|| {
                AppError::Internal("Could not generate a unique code".to_string())
            })?
        }
    };

    let new_code = redemption_code::ActiveModel {
        code: Set(code_value),
        is_active: Set(true),
        scheduled_start: Set(params.scheduled_start),
        claimed_at: Set(None),
        claimed_by_username: Set(None),
        is_test_code: Set(params.is_test_code),
        created_by: Set(params.created_by),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    let created = new_code.insert(db).await?;

    for product_id in &params.product_ids {
        let link = code_product::ActiveModel {
            code_id: Set(created.id),
            product_id: Set(*product_id),
        };
        link.insert(db).await?;
    }

    Ok((created, products))
}

/// Look up a code by its normalized value
pub async fn find_by_code(db: &DbConn, code: &str) -> Result<Option<redemption_code::Model>> {
    Ok(RedemptionCode::find()
        .filter(redemption_code::Column::Code.eq(code))
        .one(db)
        .await?)
}
