use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::config::CONFIG;
use crate::db::DbConn;
use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::models::{session, user};

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against its hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Create a session row for a user and return it. The session id is the
/// opaque token handed to the browser.
pub async fn create_session(db: &DbConn, user_id: i64) -> Result<session::Model> {
    let now = Utc::now();
    let token = uuid::Uuid::new_v4().to_string();

    let new_session = session::ActiveModel {
        id: Set(token),
        user_id: Set(user_id),
        created_at: Set(now),
        expires_at: Set(now + Duration::seconds(CONFIG.auth.session_ttl_secs)),
        last_accessed_at: Set(now),
    };

    Ok(new_session.insert(db).await?)
}

/// Resolve a session token to its active admin user.
///
/// Returns None for unknown, expired, or disabled-user sessions. Bumps
/// `last_accessed_at` on success.
pub async fn validate_session(db: &DbConn, token: &str) -> Result<Option<user::Model>> {
    let Some(found_session) = Session::find_by_id(token).one(db).await? else {
        return Ok(None);
    };

    let now = Utc::now();
    if found_session.expires_at <= now {
        return Ok(None);
    }

    let found_user = User::find_by_id(found_session.user_id)
        .filter(user::Column::IsActive.eq(true))
        .one(db)
        .await?;

    if found_user.is_some() {
        let mut session_model: session::ActiveModel = found_session.into();
        session_model.last_accessed_at = Set(now);
        session_model.update(db).await?;
    }

    Ok(found_user)
}

/// Delete a session row; unknown tokens are a no-op
pub async fn revoke_session(db: &DbConn, token: &str) -> Result<()> {
    Session::delete_by_id(token).exec(db).await?;
    Ok(())
}

/// Delete all expired sessions, returning how many were removed
pub async fn purge_expired_sessions(db: &DbConn) -> Result<u64> {
    let result = Session::delete_many()
        .filter(session::Column::ExpiresAt.lte(Utc::now()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Ensure the configured admin account exists, creating it on first start
pub async fn ensure_admin(db: &DbConn) -> Result<()> {
    let (Some(username), Some(password)) = (
        CONFIG.auth.admin_username.as_deref(),
        CONFIG.auth.admin_password.as_deref(),
    ) else {
        if User::find().count(db).await? == 0 {
            tracing::warn!(
                "No admin account exists and BLOXSHOP_ADMIN_USERNAME/BLOXSHOP_ADMIN_PASSWORD \
                 are unset; the admin API will be unreachable"
            );
        }
        return Ok(());
    };

    let existing = User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let now = Utc::now();
    let new_user = user::ActiveModel {
        username: Set(username.to_string()),
        hashed_password: Set(hash_password(password)?),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    new_user.insert(db).await?;
    tracing::info!("Created admin account '{}'", username);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let hashed = hash_password("hunter2!").unwrap();
        assert_ne!(hashed, "hunter2!");
        assert!(verify_password("hunter2!", &hashed));
        assert!(!verify_password("hunter3!", &hashed));
    }

    #[test]
    fn test_verify_password_bad_hash() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }
}
