use std::env;

#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Webhook that receives a JSON payload for every successful claim.
    /// Notifications are disabled when unset.
    pub claim_webhook_url: Option<String>,
}

impl NotifyConfig {
    pub fn from_env() -> Self {
        Self {
            claim_webhook_url: env::var("BLOXSHOP_CLAIM_WEBHOOK_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }
}
