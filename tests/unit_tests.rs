// Unit tests for Astro Match

use astro_match::core::{MatchingEngine, compatibility_score, age_years, distance::haversine_distance};
use astro_match::models::{Profile, CurrentUser, Decision, ScoringOptions};
use chrono::{TimeZone, Utc};

fn profile(id: &str, lat: f64, lng: f64) -> Profile {
    Profile {
        user_id: id.to_string(),
        name: format!("User {}", id),
        date_of_birth: Utc.with_ymd_and_hms(1995, 3, 10, 0, 0, 0).unwrap(),
        profile_picture: None,
        lat: Some(lat),
        lng: Some(lng),
    }
}

fn current_user(id: &str, liked: &[&str], disliked: &[&str]) -> CurrentUser {
    CurrentUser {
        user_id: id.to_string(),
        lat: Some(0.0),
        lng: Some(0.0),
        liked: liked.iter().map(|s| s.to_string()).collect(),
        disliked: disliked.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(40.7128, -74.0060, 40.7128, -74.0060);
    assert!(distance < 0.01);
}

#[test]
fn test_haversine_distance_manhattan_to_brooklyn() {
    // Manhattan to Brooklyn is approximately 5-10 km
    let distance = haversine_distance(40.7580, -73.9855, 40.6782, -73.9442);
    assert!(distance > 5.0 && distance < 15.0);
}

#[test]
fn test_load_excludes_self_and_decided_ids() {
    let engine = MatchingEngine::default();
    let user = current_user("me", &["liked_one"], &["disliked_one"]);

    let directory = vec![
        profile("me", 0.0, 0.0),
        profile("liked_one", 0.0, 1.0),
        profile("fresh_a", 0.0, 2.0),
        profile("disliked_one", 0.0, 3.0),
        profile("fresh_b", 0.0, 4.0),
    ];

    let state = engine.load_candidates(directory, &user);

    let ids: Vec<&str> = state.queue.iter().map(|p| p.user_id.as_str()).collect();
    assert_eq!(ids, vec!["fresh_a", "fresh_b"]);
    assert_eq!(state.cursor, Some(0));
}

#[test]
fn test_load_preserves_directory_order() {
    let engine = MatchingEngine::default();
    let user = current_user("me", &[], &[]);

    // Deliberately not sorted by id or by distance
    let directory = vec![
        profile("zeta", 10.0, 10.0),
        profile("alpha", 0.0, 0.001),
        profile("mid", 5.0, 5.0),
    ];

    let state = engine.load_candidates(directory, &user);

    let ids: Vec<&str> = state.queue.iter().map(|p| p.user_id.as_str()).collect();
    assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_decide_shrinks_queue_and_records_exactly_one_id() {
    let engine = MatchingEngine::default();
    let user = current_user("me", &[], &[]);
    let state = engine.load_candidates(
        vec![profile("a", 0.0, 1.0), profile("b", 0.0, 2.0), profile("c", 0.0, 3.0)],
        &user,
    );

    let outcome = engine.decide(&state, &user, Decision::Accept).unwrap();

    assert_eq!(outcome.state.remaining(), 2);
    assert_eq!(outcome.user.liked, vec!["a"]);
    assert!(outcome.user.disliked.is_empty());
}

#[test]
fn test_decide_on_last_candidate_reaches_terminal_state() {
    let engine = MatchingEngine::default();
    let user = current_user("me", &[], &[]);
    let state = engine.load_candidates(vec![profile("only", 0.0, 1.0)], &user);

    let outcome = engine.decide(&state, &user, Decision::Reject).unwrap();

    assert!(outcome.state.is_exhausted());
    assert_eq!(outcome.state.cursor, None);
    assert!(outcome.state.active().is_none());

    // Terminal state is absorbing: further decides are no-ops
    assert!(engine.decide(&outcome.state, &outcome.user, Decision::Accept).is_none());
}

#[test]
fn test_compatibility_symmetry() {
    let opts = ScoringOptions::default();
    let a = Some((35.6762, 139.6503)); // Tokyo
    let b = Some((-33.8688, 151.2093)); // Sydney

    assert_eq!(compatibility_score(a, b, opts), compatibility_score(b, a, opts));
}

#[test]
fn test_compatibility_identical_coordinates() {
    let opts = ScoringOptions::default();
    assert_eq!(
        compatibility_score(Some((48.8566, 2.3522)), Some((48.8566, 2.3522)), opts),
        100
    );
}

#[test]
fn test_compatibility_antipodal_unclamped() {
    // Distance is near the ~20015 km haversine maximum, so the unclamped
    // score floors to -1. Negative scores are possible by design.
    let opts = ScoringOptions::default();
    let score = compatibility_score(Some((0.0, 0.0)), Some((0.0, 180.0)), opts);
    assert_eq!(score, -1);
}

#[test]
fn test_compatibility_missing_coordinates_is_zero() {
    let opts = ScoringOptions::default();
    assert_eq!(compatibility_score(None, None, opts), 0);
    assert_eq!(compatibility_score(Some((0.0, 0.0)), None, opts), 0);
}

#[test]
fn test_spec_scenario_two_profile_directory() {
    // directory = [A(0,0), B(0,1)], acting user = A with empty sets.
    // Load yields queue=[B], cursor=0; accept empties the queue and
    // records B into A's like set.
    let engine = MatchingEngine::default();
    let user = current_user("A", &[], &[]);

    let directory = vec![profile("A", 0.0, 0.0), profile("B", 0.0, 1.0)];
    let state = engine.load_candidates(directory, &user);

    assert_eq!(state.remaining(), 1);
    assert_eq!(state.active().unwrap().user_id, "B");
    assert_eq!(state.cursor, Some(0));

    let outcome = engine.decide(&state, &user, Decision::Accept).unwrap();

    assert!(outcome.state.is_exhausted());
    assert_eq!(outcome.state.cursor, None);
    assert_eq!(outcome.user.liked, vec!["B"]);
}

#[test]
fn test_age_by_calendar_year() {
    // Birth year 1990 evaluated in 2024 is 34 regardless of month/day
    let born_january = Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap();
    let born_december = Utc.with_ymd_and_hms(1990, 12, 31, 0, 0, 0).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

    assert_eq!(age_years(born_january, now), 34);
    assert_eq!(age_years(born_december, now), 34);
}
