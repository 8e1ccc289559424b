//! Admin authentication middleware
//!
//! Requires a valid session cookie for everything mounted behind it.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::user;
use crate::services::security::validate_session;
use crate::state::AppState;

pub const SESSION_COOKIE_NAME: &str = "bloxshop_session";

/// Authenticated admin stored in request extensions
#[derive(Clone)]
pub struct AuthenticatedAdmin(pub user::Model);

/// Middleware that resolves the session cookie to an active admin.
///
/// Returns 401 Unauthorized when the cookie is missing, unknown, expired,
/// or belongs to a disabled account.
pub async fn require_admin(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let token = match extract_session_token(&req) {
        Some(t) => t,
        None => return unauthorized_response("Missing session cookie"),
    };

    let admin = match validate_session(&state.db, &token).await {
        Ok(Some(u)) => u,
        Ok(None) => return unauthorized_response("Invalid or expired session"),
        Err(e) => {
            tracing::error!("Session validation failed: {}", e);
            return unauthorized_response("Invalid or expired session");
        }
    };

    req.extensions_mut().insert(AuthenticatedAdmin(admin));

    next.run(req).await
}

/// Extract the session token from the Cookie header
fn extract_session_token(req: &Request) -> Option<String> {
    let cookies = req.headers().get(header::COOKIE)?;
    let cookie_str = cookies.to_str().ok()?;

    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some(value) = cookie.strip_prefix(&format!("{}=", SESSION_COOKIE_NAME)) {
            return Some(value.to_string());
        }
    }
    None
}

/// Create a 401 Unauthorized JSON response
fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "detail": message
        })),
    )
        .into_response()
}
