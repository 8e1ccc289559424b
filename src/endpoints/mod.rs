pub mod auth;
pub mod categories;
pub mod claim;
pub mod claims;
pub mod codes;
pub mod content;
pub mod gallery;
pub mod products;

use axum::{middleware as axum_middleware, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::CONFIG;
use crate::middleware::require_admin;
use crate::state::AppState;

/// Create the full application: API router plus tracing and CORS layers.
///
/// The storefront is served from another origin; every response carries
/// permissive CORS headers and preflights are answered by the layer.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(create_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes (storefront + claim + auth)
    let public_routes = Router::new()
        .route("/api/health", axum::routing::get(health_check))
        .route("/api/version", axum::routing::get(get_version))
        .nest("/auth", auth::auth_routes(state.clone()))
        .nest("/api", claim::claim_routes(state.clone()))
        .nest("/api/products", products::public_routes(state.clone()))
        .nest("/api/categories", categories::public_routes(state.clone()))
        .nest("/api/gallery", gallery::public_routes(state.clone()))
        .nest("/api/content", content::public_routes(state.clone()));

    // Admin routes (session required)
    let admin_routes = Router::new()
        .nest("/api/admin", admin_api_routes(state.clone()))
        .layer(axum_middleware::from_fn_with_state(state, require_admin));

    public_routes.merge(admin_routes)
}

/// Admin routes under /api/admin/* (protected by session middleware)
fn admin_api_routes(state: AppState) -> Router {
    Router::new()
        .nest("/products", products::admin_routes(state.clone()))
        .nest("/categories", categories::admin_routes(state.clone()))
        .nest("/codes", codes::admin_routes(state.clone()))
        .nest("/claims", claims::admin_routes(state.clone()))
        .nest("/gallery", gallery::admin_routes(state.clone()))
        .nest("/content", content::admin_routes(state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Version info endpoint
async fn get_version() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "version": CONFIG.version,
        "backend": "rust"
    }))
}
