// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Profile, CurrentUser, Decision, Direction, CandidateCard, ScoringOptions};
pub use requests::{StartSessionRequest, DecideRequest, AdvanceRequest};
pub use responses::{SessionResponse, DecideResponse, HealthResponse, ErrorResponse};
