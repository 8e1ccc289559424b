use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, Set};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::gallery_item;
use crate::models::prelude::*;
use crate::schemas::gallery::{CreateGalleryItem, ReorderGallery, UpdateGalleryItem};
use crate::state::AppState;

pub fn public_routes(state: AppState) -> Router {
    Router::new().route("/", get(list_gallery)).with_state(state)
}

pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_gallery).post(create_item))
        .route("/order", patch(reorder_gallery))
        .route("/{item_id}", patch(update_item).delete(delete_item))
        .with_state(state)
}

/// List gallery items in display order
async fn list_gallery(State(state): State<AppState>) -> Result<Json<Vec<gallery_item::Model>>> {
    let items = GalleryItem::find()
        .order_by_asc(gallery_item::Column::SortOrder)
        .order_by_asc(gallery_item::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(items))
}

/// Add a gallery item
async fn create_item(
    State(state): State<AppState>,
    Json(data): Json<CreateGalleryItem>,
) -> Result<Json<gallery_item::Model>> {
    data.validate()?;

    let new_item = gallery_item::ActiveModel {
        image_url: Set(data.image_url),
        caption: Set(data.caption),
        sort_order: Set(data.sort_order),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    let created = new_item.insert(&state.db).await?;

    Ok(Json(created))
}

/// Update a gallery item
async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
    Json(data): Json<UpdateGalleryItem>,
) -> Result<Json<gallery_item::Model>> {
    data.validate()?;

    let existing = GalleryItem::find_by_id(item_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Gallery item not found".to_string()))?;

    let mut model: gallery_item::ActiveModel = existing.into();
    if let Some(image_url) = data.image_url {
        model.image_url = Set(image_url);
    }
    if let Some(caption) = data.caption {
        model.caption = Set(Some(caption));
    }
    if let Some(sort_order) = data.sort_order {
        model.sort_order = Set(sort_order);
    }
    let updated = model.update(&state.db).await?;

    Ok(Json(updated))
}

/// Delete a gallery item
async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let existing = GalleryItem::find_by_id(item_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Gallery item not found".to_string()))?;

    existing.delete(&state.db).await?;

    Ok(Json(serde_json::json!({"message": "Gallery item deleted"})))
}

/// Persist a new ordering after drag-and-drop in the admin UI
async fn reorder_gallery(
    State(state): State<AppState>,
    Json(data): Json<ReorderGallery>,
) -> Result<Json<Vec<gallery_item::Model>>> {
    for position in &data.items {
        let existing = GalleryItem::find_by_id(position.id)
            .one(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!("Unknown gallery item id {}", position.id))
            })?;

        let mut model: gallery_item::ActiveModel = existing.into();
        model.sort_order = Set(position.sort_order);
        model.update(&state.db).await?;
    }

    let items = GalleryItem::find()
        .order_by_asc(gallery_item::Column::SortOrder)
        .order_by_asc(gallery_item::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(items))
}
