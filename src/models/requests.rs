use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to start a swipe session for a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StartSessionRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}

/// Request to decide on the active candidate
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DecideRequest {
    /// "accept" or "reject"
    #[validate(length(min = 1))]
    pub decision: String,
}

/// Request to move the cursor without deciding
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdvanceRequest {
    /// "next" or "prev"
    #[validate(length(min = 1))]
    pub direction: String,
}
