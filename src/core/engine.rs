use chrono::{DateTime, Utc};

use crate::core::queue::build_candidate_queue;
use crate::core::scoring::{age_years, compatibility_score};
use crate::models::{CandidateCard, CurrentUser, Decision, Direction, Profile, ScoringOptions};

/// Queue and cursor for one swipe session
///
/// Invariant: `cursor` is `Some(i)` with `i < queue.len()` whenever the
/// queue is non-empty, and `None` once the queue is exhausted (the terminal
/// empty state).
#[derive(Debug, Clone)]
pub struct SwipeState {
    pub queue: Vec<Profile>,
    pub cursor: Option<usize>,
}

impl SwipeState {
    /// The active candidate under the cursor
    pub fn active(&self) -> Option<&Profile> {
        self.cursor.and_then(|i| self.queue.get(i))
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Result of a decide operation
#[derive(Debug, Clone)]
pub struct DecisionOutcome {
    pub state: SwipeState,
    pub user: CurrentUser,
    pub decided_user_id: String,
    pub decision: Decision,
}

/// The matching engine
///
/// Pure state transitions over immutable snapshots: every operation takes
/// the prior state by reference and returns the successor. Persistence of
/// decisions belongs to the caller, which keeps the engine free of backend
/// concerns and trivially testable.
#[derive(Debug, Clone, Copy)]
pub struct MatchingEngine {
    scoring: ScoringOptions,
}

impl MatchingEngine {
    pub fn new(scoring: ScoringOptions) -> Self {
        Self { scoring }
    }

    /// Build the initial session state from a directory snapshot
    ///
    /// Filters out the acting user and everything already decided, keeping
    /// directory order. A non-empty queue starts with the cursor on its
    /// first entry; an empty queue starts (and stays) exhausted.
    pub fn load_candidates(&self, directory: Vec<Profile>, user: &CurrentUser) -> SwipeState {
        let queue = build_candidate_queue(directory, user);
        let cursor = if queue.is_empty() { None } else { Some(0) };

        SwipeState { queue, cursor }
    }

    /// Apply an accept/reject decision to the active candidate
    ///
    /// Removes the entry under the cursor and records its id into the
    /// matching decision set, idempotently. After removal the cursor stays
    /// on the same index so the next entry in directory order slides into
    /// the active slot; deciding on the tail entry re-clamps to the new
    /// last index, and emptying the queue clears the cursor.
    ///
    /// Returns `None` without touching anything when there is no active
    /// candidate, so a double-tap racing the queue update degrades to a
    /// no-op instead of a panic.
    pub fn decide(
        &self,
        state: &SwipeState,
        user: &CurrentUser,
        decision: Decision,
    ) -> Option<DecisionOutcome> {
        let cursor = state.cursor?;
        if cursor >= state.queue.len() {
            return None;
        }

        let mut queue = state.queue.clone();
        let removed = queue.remove(cursor);

        let mut user = user.clone();
        match decision {
            Decision::Accept => user.record_like(&removed.user_id),
            Decision::Reject => user.record_dislike(&removed.user_id),
        }

        let cursor = if queue.is_empty() {
            None
        } else {
            Some(cursor.min(queue.len() - 1))
        };

        Some(DecisionOutcome {
            state: SwipeState { queue, cursor },
            user,
            decided_user_id: removed.user_id,
            decision,
        })
    }

    /// Move the cursor one step without deciding
    ///
    /// Pure navigation with no persistence. Requests that would leave the
    /// queue bounds return the state unchanged.
    pub fn advance(&self, state: &SwipeState, direction: Direction) -> SwipeState {
        let Some(cursor) = state.cursor else {
            return state.clone();
        };

        let next = match direction {
            Direction::Next if cursor + 1 < state.queue.len() => cursor + 1,
            Direction::Prev if cursor > 0 => cursor - 1,
            _ => cursor,
        };

        SwipeState {
            queue: state.queue.clone(),
            cursor: Some(next),
        }
    }

    /// Project a profile into the card shown to the client
    pub fn card(&self, profile: &Profile, user: &CurrentUser, now: DateTime<Utc>) -> CandidateCard {
        CandidateCard {
            user_id: profile.user_id.clone(),
            name: profile.name.clone(),
            profile_picture: profile.profile_picture.clone(),
            age: age_years(profile.date_of_birth, now),
            compatibility: compatibility_score(
                user.coordinates(),
                profile.coordinates(),
                self.scoring,
            ),
        }
    }

    /// Card for the active candidate, if any
    pub fn active_card(
        &self,
        state: &SwipeState,
        user: &CurrentUser,
        now: DateTime<Utc>,
    ) -> Option<CandidateCard> {
        state.active().map(|profile| self.card(profile, user, now))
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new(ScoringOptions::default())
    }
}
