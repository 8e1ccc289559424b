use std::env;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Public base URL of the deployment; a `https://` scheme turns on the
    /// Secure flag for session cookies.
    pub public_url: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("BLOXSHOP_API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BLOXSHOP_API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            public_url: env::var("BLOXSHOP_PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
        }
    }
}
