pub mod auth;

pub use auth::{require_admin, AuthenticatedAdmin, SESSION_COOKIE_NAME};
