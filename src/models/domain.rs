use serde::{Deserialize, Serialize};

/// Candidate profile as stored in the user directory
///
/// Immutable once fetched for a session. Coordinates are optional because
/// older accounts predate location onboarding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    #[serde(rename = "dateAndTimeOfBirth")]
    pub date_of_birth: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "profilePicture", default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl Profile {
    /// Both coordinates, or None if either is missing
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}

/// The acting user: profile fields plus the ids already decided on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(rename = "like", default)]
    pub liked: Vec<String>,
    #[serde(rename = "dislike", default)]
    pub disliked: Vec<String>,
}

impl CurrentUser {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }

    /// True if the user has already liked or disliked the given id
    pub fn has_decided(&self, user_id: &str) -> bool {
        self.liked.iter().any(|id| id == user_id)
            || self.disliked.iter().any(|id| id == user_id)
    }

    /// Record a like. Inserting an already-present id is a no-op.
    pub fn record_like(&mut self, user_id: &str) {
        if !self.liked.iter().any(|id| id == user_id) {
            self.liked.push(user_id.to_string());
        }
    }

    /// Record a dislike. Inserting an already-present id is a no-op.
    pub fn record_dislike(&mut self, user_id: &str) {
        if !self.disliked.iter().any(|id| id == user_id) {
            self.disliked.push(user_id.to_string());
        }
    }
}

/// A swipe decision on the active candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accept,
    Reject,
}

/// Pure cursor navigation between candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

/// Active candidate projection returned to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateCard {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    #[serde(rename = "profilePicture")]
    pub profile_picture: Option<String>,
    pub age: i32,
    pub compatibility: i64,
}

/// Compatibility scoring options
#[derive(Debug, Clone, Copy)]
pub struct ScoringOptions {
    /// Clamp scores into [0, 100]. The historical behavior is unclamped,
    /// which can go negative for near-antipodal pairs.
    pub clamp: bool,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self { clamp: false }
    }
}
