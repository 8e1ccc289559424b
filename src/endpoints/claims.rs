use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::error::Result;
use crate::services::ledger::{
    get_claim_stats, list_claims, ClaimLedgerQuery, ClaimLedgerResponse, ClaimStats,
};
use crate::state::AppState;

pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_claims_endpoint))
        .route("/stats", get(claim_stats_endpoint))
        .with_state(state)
}

/// Browse the claim ledger
async fn list_claims_endpoint(
    State(state): State<AppState>,
    Query(query): Query<ClaimLedgerQuery>,
) -> Result<Json<ClaimLedgerResponse>> {
    Ok(Json(list_claims(&state.db, query).await?))
}

/// Dashboard statistics (test claims excluded)
async fn claim_stats_endpoint(State(state): State<AppState>) -> Result<Json<ClaimStats>> {
    Ok(Json(get_claim_stats(&state.db).await?))
}
