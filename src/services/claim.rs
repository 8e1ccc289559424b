//! Code redemption.
//!
//! A claim exchanges a one-time code for its product bundle at the prices in
//! effect right now. The claim-mark is a conditional update on `claimed_at`
//! with an explicit affected-row check, so of any number of concurrent
//! attempts for the same code at most one succeeds. The ledger insert after
//! a successful claim-mark is best-effort: the grant is authoritative and is
//! never rolled back because bookkeeping failed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DbErr, EntityTrait, ModelTrait, QueryFilter, Set};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::db::DbConn;
use crate::models::prelude::*;
use crate::models::{claim_record, product, redemption_code};
use crate::services::codes::normalize_code;
use crate::services::notify::{ClaimNotification, ClaimNotifier};

#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("code not found")]
    NotFound,
    #[error("code is deactivated")]
    Inactive,
    #[error("code is not yet active")]
    NotYetActive(DateTime<Utc>),
    #[error("code already claimed")]
    AlreadyClaimed(Option<String>),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl ClaimError {
    /// User-facing message, in the storefront's language
    pub fn user_message(&self) -> String {
        match self {
            ClaimError::NotFound => "Ongeldige code".to_string(),
            ClaimError::Inactive => "Code is gedeactiveerd".to_string(),
            ClaimError::NotYetActive(at) => format!(
                "Code is nog niet actief. Beschikbaar vanaf {}",
                at.format("%d-%m-%Y %H:%M")
            ),
            ClaimError::AlreadyClaimed(by) => format!(
                "Code is al geclaimed door {}",
                by.as_deref().unwrap_or("een andere speler")
            ),
            ClaimError::Database(_) => "Server error".to_string(),
        }
    }
}

/// Product handed to the claimant. Prices are deliberately absent.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GrantedProduct {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub details: Option<String>,
}

#[derive(Debug)]
pub struct ClaimOutcome {
    pub products: Vec<GrantedProduct>,
    pub message: String,
}

/// Sum of list prices, total discount, and sum of effective prices.
/// Trusts stored ordering of `discounted_price` vs `price`.
fn compute_totals(products: &[product::Model]) -> (Decimal, Decimal, Decimal) {
    let total_amount: Decimal = products.iter().map(|p| p.price).sum();
    let final_amount: Decimal = products.iter().map(|p| p.effective_price()).sum();
    (total_amount, total_amount - final_amount, final_amount)
}

/// Point-in-time pricing snapshot stored on the ledger row
fn snapshot_products(products: &[product::Model]) -> serde_json::Value {
    serde_json::Value::Array(
        products
            .iter()
            .map(|p| {
                serde_json::json!({
                    "id": p.id,
                    "name": p.name,
                    "description": p.description,
                    "details": p.details,
                    "original_price": p.price,
                    "final_price": p.effective_price(),
                })
            })
            .collect(),
    )
}

/// Claim a redemption code for a Roblox user.
///
/// Preconditions are checked in order (existence, active, schedule,
/// unclaimed), each with its own error; nothing is written until all pass.
pub async fn claim_code(
    db: &DbConn,
    notifier: &ClaimNotifier,
    raw_code: &str,
    roblox_username: &str,
) -> Result<ClaimOutcome, ClaimError> {
    let normalized = normalize_code(raw_code);

    let code = RedemptionCode::find()
        .filter(redemption_code::Column::Code.eq(&normalized))
        .one(db)
        .await?
        .ok_or(ClaimError::NotFound)?;

    if !code.is_active {
        return Err(ClaimError::Inactive);
    }

    let now = Utc::now();
    if let Some(start) = code.scheduled_start {
        if start > now {
            return Err(ClaimError::NotYetActive(start));
        }
    }

    if code.is_claimed() {
        return Err(ClaimError::AlreadyClaimed(code.claimed_by_username));
    }

    // Current prices, read before the claim-mark; the snapshot below is what
    // the ledger keeps even if products are edited a moment later.
    let products = code.find_related(Product).all(db).await?;
    let (total_amount, total_discount, final_amount) = compute_totals(&products);
    let products_data = snapshot_products(&products);

    // Claim-mark: compare-and-set on claimed_at. A plain read-then-write
    // would race with a concurrent claim of the same code.
    let update = RedemptionCode::update_many()
        .col_expr(redemption_code::Column::ClaimedAt, Expr::value(Some(now)))
        .col_expr(
            redemption_code::Column::ClaimedByUsername,
            Expr::value(Some(roblox_username.to_string())),
        )
        .filter(redemption_code::Column::Id.eq(code.id))
        .filter(redemption_code::Column::ClaimedAt.is_null())
        .exec(db)
        .await?;

    if update.rows_affected == 0 {
        // Lost the race; surface who won where the re-read can tell.
        let fresh = RedemptionCode::find_by_id(code.id).one(db).await?;
        return Err(ClaimError::AlreadyClaimed(
            fresh.and_then(|c| c.claimed_by_username),
        ));
    }

    // The grant happened. Ledger and webhook failures below must not undo it.
    let record = claim_record::ActiveModel {
        code_id: Set(code.id),
        code: Set(code.code.clone()),
        claimed_by_username: Set(roblox_username.to_string()),
        total_amount: Set(total_amount),
        total_discount: Set(total_discount),
        final_amount: Set(final_amount),
        products_data: Set(products_data),
        is_test_claim: Set(code.is_test_code),
        claimed_at: Set(now),
        ..Default::default()
    };
    if let Err(e) = ClaimRecord::insert(record).exec(db).await {
        tracing::error!(
            code_id = code.id,
            code = %code.code,
            "Claim succeeded but ledger insert failed, statistics need reconciliation: {}",
            e
        );
    }

    notifier.notify_claim(ClaimNotification {
        code: code.code.clone(),
        claimed_by_username: roblox_username.to_string(),
        product_names: products.iter().map(|p| p.name.clone()).collect(),
        final_amount,
        is_test_claim: code.is_test_code,
    });

    let names: Vec<String> = products.iter().map(|p| p.name.clone()).collect();
    let granted = products
        .into_iter()
        .map(|p| GrantedProduct {
            id: p.id,
            name: p.name,
            description: p.description,
            details: p.details,
        })
        .collect();

    Ok(ClaimOutcome {
        products: granted,
        message: format!("Code succesvol geclaimed! Je ontvangt: {}", names.join(", ")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_with_prices(id: i64, price: i64, discounted: Option<i64>) -> product::Model {
        let now = Utc::now();
        product::Model {
            id,
            name: format!("Product {}", id),
            description: "test".to_string(),
            details: None,
            price: Decimal::new(price, 0),
            discounted_price: discounted.map(|d| Decimal::new(d, 0)),
            category_id: None,
            image_url: None,
            sort_order: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_totals_with_mixed_discounts() {
        let products = vec![
            product_with_prices(1, 10, None),
            product_with_prices(2, 20, Some(15)),
        ];
        let (total, discount, final_amount) = compute_totals(&products);
        assert_eq!(total, Decimal::new(30, 0));
        assert_eq!(final_amount, Decimal::new(25, 0));
        assert_eq!(discount, Decimal::new(5, 0));
    }

    #[test]
    fn test_totals_without_discounts() {
        let products = vec![product_with_prices(1, 50, None)];
        let (total, discount, final_amount) = compute_totals(&products);
        assert_eq!(total, Decimal::new(50, 0));
        assert_eq!(discount, Decimal::ZERO);
        assert_eq!(final_amount, Decimal::new(50, 0));
    }

    #[test]
    fn test_totals_empty_bundle() {
        let (total, discount, final_amount) = compute_totals(&[]);
        assert_eq!(total, Decimal::ZERO);
        assert_eq!(discount, Decimal::ZERO);
        assert_eq!(final_amount, Decimal::ZERO);
    }

    #[test]
    fn test_snapshot_keeps_both_prices() {
        let products = vec![product_with_prices(7, 20, Some(15))];
        let snapshot = snapshot_products(&products);
        let entry = &snapshot[0];
        assert_eq!(entry["id"], 7);
        assert_eq!(entry["original_price"], serde_json::json!(Decimal::new(20, 0)));
        assert_eq!(entry["final_price"], serde_json::json!(Decimal::new(15, 0)));
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(ClaimError::NotFound.user_message(), "Ongeldige code");
        assert_eq!(
            ClaimError::AlreadyClaimed(Some("PlayerOne".to_string())).user_message(),
            "Code is al geclaimed door PlayerOne"
        );
        assert_eq!(
            ClaimError::AlreadyClaimed(None).user_message(),
            "Code is al geclaimed door een andere speler"
        );
        let at = DateTime::parse_from_rfc3339("2025-06-01T18:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            ClaimError::NotYetActive(at).user_message(),
            "Code is nog niet actief. Beschikbaar vanaf 01-06-2025 18:30"
        );
    }
}
