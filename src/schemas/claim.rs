use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::services::claim::GrantedProduct;

/// Body of `POST /api/claim`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ClaimRequest {
    pub code: Option<String>,
    pub roblox_username: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClaimSuccessResponse {
    /// Always true
    pub success: bool,
    pub products: Vec<GrantedProduct>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClaimFailureResponse {
    /// Always false
    pub success: bool,
    pub error: String,
}
