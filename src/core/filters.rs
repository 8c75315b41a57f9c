use chrono::Duration;

use crate::models::{FoundReport, LostPet, LostPetStatus};

/// Check whether a lost-pet record is eligible for scoring against a found
/// report
///
/// All conditions must hold:
/// - the record is still `perdido` and active on the map
/// - same species
/// - same city and state (case-insensitive equality, nothing fuzzier)
/// - lost no more than `window_days` before the found-date
///
/// There is deliberately no `date_lost <= date_found` upper bound: a record
/// dated after the found-date stays eligible, mirroring how the platform has
/// always behaved.
#[inline]
pub fn is_eligible_candidate(lost: &LostPet, report: &FoundReport, window_days: i64) -> bool {
    if lost.status != LostPetStatus::Lost || !lost.active {
        return false;
    }

    if lost.species != report.species {
        return false;
    }

    if !eq_ignore_case(&lost.city, &report.city) || !eq_ignore_case(&lost.state, &report.state) {
        return false;
    }

    let cutoff = report.date_found - Duration::days(window_days);
    if lost.date_lost < cutoff {
        return false;
    }

    true
}

/// Case-insensitive equality over trimmed Unicode strings ("São Paulo" must
/// match "são paulo")
#[inline]
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
