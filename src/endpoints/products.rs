use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::models::{code_product, product, redemption_code};
use crate::schemas::product::{CreateProduct, ProductResponse, UpdateProduct};
use crate::state::AppState;

/// Storefront routes: active products only
pub fn public_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_active_products))
        .route("/{product_id}", get(get_active_product))
        .with_state(state)
}

/// Admin routes: full catalog management
pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_all_products).post(create_product))
        .route("/{product_id}", patch(update_product).delete(delete_product))
        .with_state(state)
}

// ============================================================================
// Public Handlers
// ============================================================================

/// List active products for the shop, in display order
async fn list_active_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>> {
    let rows = Product::find()
        .filter(product::Column::IsActive.eq(true))
        .order_by_asc(product::Column::SortOrder)
        .order_by_asc(product::Column::Id)
        .find_also_related(Category)
        .all(&state.db)
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|(p, c)| ProductResponse::from_product_with_category(p, c))
            .collect(),
    ))
}

/// Get one active product
async fn get_active_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> Result<Json<ProductResponse>> {
    let (found, category) = Product::find_by_id(product_id)
        .filter(product::Column::IsActive.eq(true))
        .find_also_related(Category)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(ProductResponse::from_product_with_category(
        found, category,
    )))
}

// ============================================================================
// Admin Handlers
// ============================================================================

/// List the whole catalog, inactive products included
async fn list_all_products(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>> {
    let rows = Product::find()
        .order_by_asc(product::Column::SortOrder)
        .order_by_asc(product::Column::Id)
        .find_also_related(Category)
        .all(&state.db)
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|(p, c)| ProductResponse::from_product_with_category(p, c))
            .collect(),
    ))
}

/// Create a product
async fn create_product(
    State(state): State<AppState>,
    Json(data): Json<CreateProduct>,
) -> Result<Json<ProductResponse>> {
    data.validate()?;

    if let Some(category_id) = data.category_id {
        Category::find_by_id(category_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::BadRequest("Category does not exist".to_string()))?;
    }

    let now = Utc::now();
    let new_product = product::ActiveModel {
        name: Set(data.name),
        description: Set(data.description),
        details: Set(data.details),
        price: Set(data.price),
        discounted_price: Set(data.discounted_price),
        category_id: Set(data.category_id),
        image_url: Set(data.image_url),
        sort_order: Set(data.sort_order),
        is_active: Set(data.is_active),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = new_product.insert(&state.db).await?;
    let category = created.find_related(Category).one(&state.db).await?;

    Ok(Json(ProductResponse::from_product_with_category(
        created, category,
    )))
}

/// Update a product
async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
    Json(data): Json<UpdateProduct>,
) -> Result<Json<ProductResponse>> {
    data.validate()?;

    let existing = Product::find_by_id(product_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    if let Some(category_id) = data.category_id {
        Category::find_by_id(category_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::BadRequest("Category does not exist".to_string()))?;
    }

    let mut model: product::ActiveModel = existing.into();
    if let Some(name) = data.name {
        model.name = Set(name);
    }
    if let Some(description) = data.description {
        model.description = Set(description);
    }
    if let Some(details) = data.details {
        model.details = Set(Some(details));
    }
    if let Some(price) = data.price {
        model.price = Set(price);
    }
    if data.clear_discount {
        model.discounted_price = Set(None);
    } else if let Some(discounted) = data.discounted_price {
        model.discounted_price = Set(Some(discounted));
    }
    if let Some(category_id) = data.category_id {
        model.category_id = Set(Some(category_id));
    }
    if let Some(image_url) = data.image_url {
        model.image_url = Set(Some(image_url));
    }
    if let Some(sort_order) = data.sort_order {
        model.sort_order = Set(sort_order);
    }
    if let Some(is_active) = data.is_active {
        model.is_active = Set(is_active);
    }
    model.updated_at = Set(Utc::now());

    let updated = model.update(&state.db).await?;
    let category = updated.find_related(Category).one(&state.db).await?;

    Ok(Json(ProductResponse::from_product_with_category(
        updated, category,
    )))
}

/// Delete a product.
///
/// Refused while an unclaimed code still grants it: code bundles are fixed
/// at creation and must not shrink under an outstanding code. Claim records
/// are unaffected either way, they carry their own snapshot.
async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let existing = Product::find_by_id(product_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let outstanding = RedemptionCode::find()
        .inner_join(CodeProduct)
        .filter(code_product::Column::ProductId.eq(product_id))
        .filter(redemption_code::Column::ClaimedAt.is_null())
        .one(&state.db)
        .await?;
    if let Some(code) = outstanding {
        return Err(AppError::BadRequest(format!(
            "Product is part of unclaimed code {}",
            code.code
        )));
    }

    existing.delete(&state.db).await?;

    Ok(Json(serde_json::json!({"message": "Product deleted"})))
}
