use sea_orm::DatabaseConnection;

use crate::services::notify::ClaimNotifier;

/// Database connection type alias
pub type DbConn = DatabaseConnection;

/// Application state containing all shared resources
#[derive(Clone)]
pub struct AppState {
    pub db: DbConn,
    pub notifier: ClaimNotifier,
}

impl AppState {
    pub fn new(db: DbConn, notifier: ClaimNotifier) -> Self {
        Self { db, notifier }
    }
}
