use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};

use crate::config::CONFIG;
use crate::error::{AppError, Result};
use crate::middleware::SESSION_COOKIE_NAME;
use crate::models::prelude::*;
use crate::models::user;
use crate::services::{create_session, revoke_session, validate_session, verify_password};
use crate::state::AppState;

/// Create auth routes for session management
pub fn auth_routes(state: AppState) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(current_admin))
        .with_state(state)
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: i64,
    pub username: String,
}

// ============================================================================
// Session Cookie Helpers
// ============================================================================

/// Create a session cookie with the given token
fn create_session_cookie(token: &str, secure: bool) -> HeaderValue {
    let cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}{}",
        SESSION_COOKIE_NAME,
        token,
        CONFIG.auth.session_ttl_secs,
        if secure { "; Secure" } else { "" }
    );
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// Create a cookie that clears the session
fn clear_session_cookie() -> HeaderValue {
    let cookie = format!(
        "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
        SESSION_COOKIE_NAME
    );
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// Extract the session token from the Cookie header
fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?;
    let cookie_str = cookies.to_str().ok()?;

    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some(value) = cookie.strip_prefix(&format!("{}=", SESSION_COOKIE_NAME)) {
            return Some(value.to_string());
        }
    }
    None
}

// ============================================================================
// Session Management Endpoints
// ============================================================================

/// Login with username and password, returns session cookie
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response> {
    let found_user = User::find()
        .filter(user::Column::Username.eq(&request.username))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    if !found_user.is_active {
        return Err(AppError::Unauthorized("Account is disabled".to_string()));
    }

    if !verify_password(&request.password, &found_user.hashed_password) {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let session = create_session(&state.db, found_user.id).await?;

    let response = Json(LoginResponse {
        user_id: found_user.id,
        username: found_user.username,
    });

    let secure = CONFIG.server.public_url.starts_with("https://");

    Ok((
        [(header::SET_COOKIE, create_session_cookie(&session.id, secure))],
        response,
    )
        .into_response())
}

/// Logout - revokes the session row and clears the cookie
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    if let Some(token) = extract_session_token(&headers) {
        revoke_session(&state.db, &token).await?;
    }

    Ok((
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(serde_json::json!({"message": "Logged out"})),
    )
        .into_response())
}

/// Current admin for the presented session cookie
async fn current_admin(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LoginResponse>> {
    let token = extract_session_token(&headers)
        .ok_or_else(|| AppError::Unauthorized("Missing session cookie".to_string()))?;

    let found_user = validate_session(&state.db, &token)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired session".to_string()))?;

    Ok(Json(LoginResponse {
        user_id: found_user.id,
        username: found_user.username,
    }))
}
