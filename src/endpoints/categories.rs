use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::models::{category, product};
use crate::schemas::category::{CategoryResponse, CreateCategory, UpdateCategory};
use crate::state::AppState;

pub fn public_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_categories))
        .with_state(state)
}

pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{category_id}",
            patch(update_category).delete(delete_category),
        )
        .with_state(state)
}

/// Lowercased, hyphenated identifier derived from a category name
fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

async fn category_response(state: &AppState, found: category::Model) -> Result<CategoryResponse> {
    let product_count = found.find_related(Product).count(&state.db).await?;
    Ok(CategoryResponse::from_category_with_count(
        found,
        product_count,
    ))
}

/// List categories in display order
async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<CategoryResponse>>> {
    let categories = Category::find()
        .order_by_asc(category::Column::SortOrder)
        .order_by_asc(category::Column::Id)
        .all(&state.db)
        .await?;

    let mut responses = Vec::new();
    for found in categories {
        responses.push(category_response(&state, found).await?);
    }

    Ok(Json(responses))
}

/// Create a category
async fn create_category(
    State(state): State<AppState>,
    Json(data): Json<CreateCategory>,
) -> Result<Json<CategoryResponse>> {
    data.validate()?;

    let slug = data
        .slug
        .map(|s| slugify(&s))
        .unwrap_or_else(|| slugify(&data.name));
    if slug.is_empty() {
        return Err(AppError::BadRequest(
            "Category name yields an empty slug".to_string(),
        ));
    }

    let existing = Category::find()
        .filter(
            category::Column::Name
                .eq(&data.name)
                .or(category::Column::Slug.eq(&slug)),
        )
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Category already exists".to_string()));
    }

    let new_category = category::ActiveModel {
        name: Set(data.name),
        slug: Set(slug),
        sort_order: Set(data.sort_order),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    let created = new_category.insert(&state.db).await?;

    Ok(Json(category_response(&state, created).await?))
}

/// Update a category
async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
    Json(data): Json<UpdateCategory>,
) -> Result<Json<CategoryResponse>> {
    data.validate()?;

    let existing = Category::find_by_id(category_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    let mut model: category::ActiveModel = existing.into();
    if let Some(name) = data.name {
        model.name = Set(name);
    }
    if let Some(slug) = data.slug {
        let slug = slugify(&slug);
        if slug.is_empty() {
            return Err(AppError::BadRequest("Slug may not be empty".to_string()));
        }
        model.slug = Set(slug);
    }
    if let Some(sort_order) = data.sort_order {
        model.sort_order = Set(sort_order);
    }

    let updated = model.update(&state.db).await?;

    Ok(Json(category_response(&state, updated).await?))
}

/// Delete a category; its products stay and lose the grouping
async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let existing = Category::find_by_id(category_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    // The FK sets category_id to NULL on SQLite/Postgres; do it explicitly
    // so the behavior does not depend on FK enforcement being enabled.
    Product::update_many()
        .col_expr(
            product::Column::CategoryId,
            sea_orm::sea_query::Expr::value(Option::<i64>::None),
        )
        .filter(product::Column::CategoryId.eq(category_id))
        .exec(&state.db)
        .await?;

    existing.delete(&state.db).await?;

    Ok(Json(serde_json::json!({"message": "Category deleted"})))
}
