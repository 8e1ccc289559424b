use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::CONFIG;

/// Outbound webhook for successful claims.
///
/// Sends are fire-and-forget: a claim must never fail or block because the
/// webhook endpoint is down.
#[derive(Clone, Default)]
pub struct ClaimNotifier {
    webhook_url: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
pub struct ClaimNotification {
    pub code: String,
    pub claimed_by_username: String,
    pub product_names: Vec<String>,
    pub final_amount: Decimal,
    pub is_test_claim: bool,
}

impl ClaimNotifier {
    /// Notifier configured from `BLOXSHOP_CLAIM_WEBHOOK_URL`
    pub fn from_config() -> Self {
        Self::new(CONFIG.notify.claim_webhook_url.clone())
    }

    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            webhook_url,
            client: reqwest::Client::new(),
        }
    }

    /// Notifier that never sends anything (tests)
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Post the claim payload to the configured webhook, if any
    pub fn notify_claim(&self, notification: ClaimNotification) {
        let Some(url) = self.webhook_url.clone() else {
            return;
        };
        let client = self.client.clone();

        tokio::spawn(async move {
            match client.post(&url).json(&notification).send().await {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!(
                        code = %notification.code,
                        status = %response.status(),
                        "Claim webhook returned non-success status"
                    );
                }
                Err(e) => {
                    tracing::warn!(code = %notification.code, "Claim webhook failed: {}", e);
                }
                Ok(_) => {}
            }
        });
    }
}
