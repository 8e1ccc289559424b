use serde::Deserialize;

/// Body of `PUT /api/admin/content/{key}` — the stored blob is free-form
/// JSON; its shape is owned by the frontend (rules text, hero settings).
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContent {
    pub value: serde_json::Value,
}
