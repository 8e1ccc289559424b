use axum::{
    extract::{Extension, Path, State},
    routing::{get, patch},
    Json, Router,
};
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, Set};

use crate::error::{AppError, Result};
use crate::middleware::AuthenticatedAdmin;
use crate::models::prelude::*;
use crate::models::redemption_code;
use crate::schemas::code::{CodeResponse, CreateCodeRequest, UpdateCodeRequest};
use crate::services::codes::{create_code, CreateCodeParams};
use crate::state::AppState;

pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_codes).post(create_code_endpoint))
        .route("/{code_id}", patch(update_code).delete(delete_code))
        .with_state(state)
}

async fn code_response(state: &AppState, code: redemption_code::Model) -> Result<CodeResponse> {
    let products = code.find_related(Product).all(&state.db).await?;
    Ok(CodeResponse::from_code_with_products(code, products))
}

/// List all codes with their bundles, newest first
async fn list_codes(State(state): State<AppState>) -> Result<Json<Vec<CodeResponse>>> {
    let codes = RedemptionCode::find()
        .order_by_desc(redemption_code::Column::CreatedAt)
        .order_by_desc(redemption_code::Column::Id)
        .all(&state.db)
        .await?;

    let mut responses = Vec::new();
    for code in codes {
        responses.push(code_response(&state, code).await?);
    }

    Ok(Json(responses))
}

/// Create a code with its immutable product bundle
async fn create_code_endpoint(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Json(data): Json<CreateCodeRequest>,
) -> Result<Json<CodeResponse>> {
    let (created, products) = create_code(
        &state.db,
        CreateCodeParams {
            code: data.code,
            product_ids: data.product_ids,
            scheduled_start: data.scheduled_start,
            is_test_code: data.is_test_code,
            created_by: admin.0.username.clone(),
        },
    )
    .await?;

    Ok(Json(CodeResponse::from_code_with_products(
        created, products,
    )))
}

/// Toggle a code's active flag. Everything else about a code is immutable:
/// the bundle is fixed at creation and claim fields are only written by the
/// claim-mark.
async fn update_code(
    State(state): State<AppState>,
    Path(code_id): Path<i64>,
    Json(data): Json<UpdateCodeRequest>,
) -> Result<Json<CodeResponse>> {
    let existing = RedemptionCode::find_by_id(code_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Code not found".to_string()))?;

    let mut model: redemption_code::ActiveModel = existing.into();
    model.is_active = Set(data.is_active);
    let updated = model.update(&state.db).await?;

    Ok(Json(code_response(&state, updated).await?))
}

/// Delete an unclaimed code. Claimed codes are permanent so their ledger
/// rows keep a resolvable origin.
async fn delete_code(
    State(state): State<AppState>,
    Path(code_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let existing = RedemptionCode::find_by_id(code_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Code not found".to_string()))?;

    if existing.is_claimed() {
        return Err(AppError::BadRequest(
            "Claimed codes cannot be deleted".to_string(),
        ));
    }

    existing.delete(&state.db).await?;

    Ok(Json(serde_json::json!({"message": "Code deleted"})))
}
