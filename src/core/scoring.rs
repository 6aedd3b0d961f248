use chrono::{DateTime, Datelike, Utc};

use crate::core::distance::haversine_distance_km;
use crate::models::ScoringOptions;

/// Maximum meaningful separation in km used to normalize distance to a score.
/// Half the Earth's circumference, rounded to the value the mobile client
/// has always used.
const SCORE_RANGE_KM: f64 = 20000.0;

/// Compatibility score between two sets of coordinates
///
/// Maps whole-km haversine distance onto a score:
/// `floor(100 - distance_km * 100 / 20000)`. Identical coordinates score
/// 100. Without clamping, near-antipodal pairs score -1; `opts.clamp`
/// bounds the result to [0, 100].
///
/// Either side missing coordinates yields 0, the defined fallback for
/// profiles without location data.
pub fn compatibility_score(
    a: Option<(f64, f64)>,
    b: Option<(f64, f64)>,
    opts: ScoringOptions,
) -> i64 {
    let (Some((lat1, lng1)), Some((lat2, lng2))) = (a, b) else {
        return 0;
    };

    let distance_km = haversine_distance_km(lat1, lng1, lat2, lng2);
    let score = (100.0 - (distance_km * 100.0) / SCORE_RANGE_KM).floor() as i64;

    if opts.clamp {
        score.clamp(0, 100)
    } else {
        score
    }
}

/// Age in years by calendar year only
///
/// Deliberately ignores month and day: a profile born in December 1990
/// evaluated in January 2024 is 34. This matches what the client has always
/// displayed; do not replace with a birthday-aware calculation.
pub fn age_years(date_of_birth: DateTime<Utc>, now: DateTime<Utc>) -> i32 {
    now.year() - date_of_birth.year()
}
