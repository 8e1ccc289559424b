use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::models::site_content;
use crate::schemas::content::UpdateContent;
use crate::state::AppState;

/// Content keys the admin console may edit
const CONTENT_KEYS: &[&str] = &["rules", "hero"];

pub fn public_routes(state: AppState) -> Router {
    Router::new()
        .route("/{key}", get(get_content))
        .with_state(state)
}

pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/{key}", put(put_content))
        .with_state(state)
}

/// Fetch a content blob (rules text, hero configuration)
async fn get_content(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<site_content::Model>> {
    let found = SiteContent::find_by_id(&key)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No content for key '{}'", key)))?;

    Ok(Json(found))
}

/// Create or replace a content blob
async fn put_content(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(data): Json<UpdateContent>,
) -> Result<Json<site_content::Model>> {
    if !CONTENT_KEYS.contains(&key.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unknown content key '{}'",
            key
        )));
    }

    let now = Utc::now();
    let existing = SiteContent::find_by_id(&key).one(&state.db).await?;

    let saved = match existing {
        Some(found) => {
            let mut model: site_content::ActiveModel = found.into();
            model.value = Set(data.value);
            model.updated_at = Set(now);
            model.update(&state.db).await?
        }
        None => {
            let model = site_content::ActiveModel {
                key: Set(key),
                value: Set(data.value),
                updated_at: Set(now),
            };
            model.insert(&state.db).await?
        }
    };

    Ok(Json(saved))
}
