// Core algorithm exports
pub mod distance;
pub mod engine;
pub mod queue;
pub mod scoring;

pub use distance::{haversine_distance, haversine_distance_km};
pub use engine::{MatchingEngine, SwipeState, DecisionOutcome};
pub use queue::{build_candidate_queue, is_undecided_candidate};
pub use scoring::{compatibility_score, age_years};
