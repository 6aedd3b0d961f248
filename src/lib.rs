//! Astro Match - candidate matching service for the AstroMagnet dating app
//!
//! This library implements the swipe-screen matching engine: an ordered
//! queue of unseen candidate profiles per user, a geographic compatibility
//! score per candidate, and accept/reject decisions persisted into the
//! acting user's like/dislike sets.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{MatchingEngine, SwipeState, compatibility_score, age_years, distance::haversine_distance};
pub use crate::models::{Profile, CurrentUser, Decision, Direction, CandidateCard, ScoringOptions};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let score = compatibility_score(Some((0.0, 0.0)), Some((0.0, 0.0)), ScoringOptions::default());
        assert_eq!(score, 100);
    }
}
