use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

use crate::db::DbConn;
use crate::error::Result;
use crate::models::claim_record;

/// Query parameters for browsing the claim ledger
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ClaimLedgerQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    /// Include claims of test codes (default false)
    pub include_test: Option<bool>,
}

/// Paginated claim ledger response
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ClaimLedgerResponse {
    pub records: Vec<claim_record::Model>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// Browse the claim ledger, newest first
pub async fn list_claims(db: &DbConn, query: ClaimLedgerQuery) -> Result<ClaimLedgerResponse> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(50).min(100);
    let offset = (page - 1) * per_page;

    let mut select = claim_record::Entity::find();
    if !query.include_test.unwrap_or(false) {
        select = select.filter(claim_record::Column::IsTestClaim.eq(false));
    }

    let total = select.clone().count(db).await?;

    let records = select
        .order_by_desc(claim_record::Column::ClaimedAt)
        .offset(offset)
        .limit(per_page)
        .all(db)
        .await?;

    let total_pages = (total as f64 / per_page as f64).ceil() as u64;

    Ok(ClaimLedgerResponse {
        records,
        total,
        page,
        per_page,
        total_pages,
    })
}

/// Dashboard statistics over the claim ledger.
/// Test claims are excluded from every figure.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ClaimStats {
    pub total_claims: u64,
    pub total_revenue: Decimal,
    pub total_discount: Decimal,
    pub claims_today: u64,
    pub claims_this_week: u64,
    pub recent_claims: Vec<claim_record::Model>,
}

pub async fn get_claim_stats(db: &DbConn) -> Result<ClaimStats> {
    let total_claims = claim_record::Entity::find()
        .filter(claim_record::Column::IsTestClaim.eq(false))
        .count(db)
        .await?;

    let today = Utc::now().date_naive();
    let today_start = today.and_hms_opt(0, 0, 0).unwrap_or_default();
    let today_start_utc =
        chrono::DateTime::<Utc>::from_naive_utc_and_offset(today_start, Utc);

    let claims_today = claim_record::Entity::find()
        .filter(claim_record::Column::IsTestClaim.eq(false))
        .filter(claim_record::Column::ClaimedAt.gte(today_start_utc))
        .count(db)
        .await?;

    let week_ago = Utc::now() - chrono::Duration::days(7);
    let claims_this_week = claim_record::Entity::find()
        .filter(claim_record::Column::IsTestClaim.eq(false))
        .filter(claim_record::Column::ClaimedAt.gte(week_ago))
        .count(db)
        .await?;

    let recent_claims = claim_record::Entity::find()
        .filter(claim_record::Column::IsTestClaim.eq(false))
        .order_by_desc(claim_record::Column::ClaimedAt)
        .limit(10)
        .all(db)
        .await?;

    // Sum in Rust rather than via SQL aggregates; the ledger is small and
    // this keeps the query portable across Postgres and SQLite.
    let all_records = claim_record::Entity::find()
        .filter(claim_record::Column::IsTestClaim.eq(false))
        .all(db)
        .await?;

    let mut total_revenue = Decimal::ZERO;
    let mut total_discount = Decimal::ZERO;
    for record in &all_records {
        total_revenue += record.final_amount;
        total_discount += record.total_discount;
    }

    Ok(ClaimStats {
        total_claims,
        total_revenue,
        total_discount,
        claims_today,
        claims_this_week,
        recent_claims,
    })
}
