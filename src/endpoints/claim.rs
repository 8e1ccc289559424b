//! Public claim endpoint.
//!
//! Speaks the storefront's `{success, …}` envelope rather than the admin
//! API's `{detail}` errors, and maps each claim failure to its own HTTP
//! status. CORS headers come from the application-wide layer.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use crate::schemas::claim::{ClaimFailureResponse, ClaimRequest, ClaimSuccessResponse};
use crate::services::claim::{self, ClaimError};
use crate::state::AppState;

pub fn claim_routes(state: AppState) -> Router {
    Router::new()
        .route("/claim", post(submit_claim))
        .with_state(state)
}

fn failure(status: StatusCode, error: &str) -> Response {
    (
        status,
        Json(ClaimFailureResponse {
            success: false,
            error: error.to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/claim",
    request_body = ClaimRequest,
    responses(
        (status = 200, description = "Code claimed", body = ClaimSuccessResponse),
        (status = 400, description = "Missing input, inactive, scheduled, or already claimed", body = ClaimFailureResponse),
        (status = 404, description = "Unknown code", body = ClaimFailureResponse),
        (status = 500, description = "Backing store failure", body = ClaimFailureResponse),
    )
)]
async fn submit_claim(
    State(state): State<AppState>,
    Json(request): Json<ClaimRequest>,
) -> Response {
    // Input validation happens before any store access.
    let code = request.code.as_deref().map(str::trim).unwrap_or_default();
    let username = request
        .roblox_username
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if code.is_empty() || username.is_empty() {
        return failure(
            StatusCode::BAD_REQUEST,
            "Code en Roblox username zijn verplicht",
        );
    }

    match claim::claim_code(&state.db, &state.notifier, code, username).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(ClaimSuccessResponse {
                success: true,
                products: outcome.products,
                message: outcome.message,
            }),
        )
            .into_response(),
        Err(e) => {
            let status = match &e {
                ClaimError::NotFound => StatusCode::NOT_FOUND,
                ClaimError::Inactive
                | ClaimError::NotYetActive(_)
                | ClaimError::AlreadyClaimed(_) => StatusCode::BAD_REQUEST,
                ClaimError::Database(err) => {
                    tracing::error!("Claim failed on the backing store: {}", err);
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            failure(status, &e.user_message())
        }
    }
}
