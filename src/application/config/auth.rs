use std::env;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session lifetime in seconds (default 7 days)
    pub session_ttl_secs: i64,
    /// Credentials for the admin account ensured at startup
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            session_ttl_secs: env::var("BLOXSHOP_SESSION_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(604_800),
            admin_username: env::var("BLOXSHOP_ADMIN_USERNAME").ok(),
            admin_password: env::var("BLOXSHOP_ADMIN_PASSWORD").ok(),
        }
    }
}
