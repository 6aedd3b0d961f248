use crate::models::{CurrentUser, Profile};

/// Check whether a directory profile is an undecided candidate for the user
///
/// Excludes the user's own profile and anything already in the like or
/// dislike sets.
#[inline]
pub fn is_undecided_candidate(profile: &Profile, user: &CurrentUser) -> bool {
    if profile.user_id == user.user_id {
        return false;
    }

    !user.has_decided(&profile.user_id)
}

/// Build the candidate queue from a directory snapshot
///
/// Order follows the directory fetch order; no re-sorting. Computed once per
/// session load and only mutated afterwards by removal of decided entries.
pub fn build_candidate_queue(directory: Vec<Profile>, user: &CurrentUser) -> Vec<Profile> {
    directory
        .into_iter()
        .filter(|profile| is_undecided_candidate(profile, user))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile(id: &str) -> Profile {
        Profile {
            user_id: id.to_string(),
            name: format!("User {}", id),
            date_of_birth: Utc::now(),
            profile_picture: None,
            lat: Some(0.0),
            lng: Some(0.0),
        }
    }

    fn user(id: &str, liked: &[&str], disliked: &[&str]) -> CurrentUser {
        CurrentUser {
            user_id: id.to_string(),
            lat: Some(0.0),
            lng: Some(0.0),
            liked: liked.iter().map(|s| s.to_string()).collect(),
            disliked: disliked.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_excludes_self_and_decided() {
        let directory = vec![
            profile("a"),
            profile("b"),
            profile("c"),
            profile("d"),
            profile("e"),
        ];
        let current = user("a", &["b"], &["d"]);

        let queue = build_candidate_queue(directory, &current);

        let ids: Vec<&str> = queue.iter().map(|p| p.user_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "e"]);
    }

    #[test]
    fn test_preserves_directory_order() {
        let directory = vec![profile("z"), profile("m"), profile("a")];
        let current = user("x", &[], &[]);

        let queue = build_candidate_queue(directory, &current);

        let ids: Vec<&str> = queue.iter().map(|p| p.user_id.as_str()).collect();
        assert_eq!(ids, vec!["z", "m", "a"]);
    }

    #[test]
    fn test_empty_directory_yields_empty_queue() {
        let current = user("x", &[], &[]);
        let queue = build_candidate_queue(vec![], &current);
        assert!(queue.is_empty());
    }
}
