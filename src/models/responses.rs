use serde::{Deserialize, Serialize};
use crate::models::domain::CandidateCard;

/// Snapshot of a swipe session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    /// Active candidate, or None once the queue is exhausted
    pub active: Option<CandidateCard>,
    pub cursor: Option<usize>,
    pub remaining: usize,
}

/// Response to a decide call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecideResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "decidedUserId")]
    pub decided_user_id: String,
    /// Whether the like/dislike write reached the decision store. The local
    /// queue mutation stands either way; a false value means the decision
    /// will resurface on the next session load.
    pub persisted: bool,
    pub active: Option<CandidateCard>,
    pub cursor: Option<usize>,
    pub remaining: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
