//! SOS Pets Match - lost-and-found pet matching service
//!
//! This library holds the matching heuristic that auto-links found-pet
//! reports to lost-pet records (Haversine distance plus weighted attribute
//! scoring), together with the REST surface and PostgreSQL store around it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_distance, MatchOutcome, Matcher};
pub use crate::models::{
    FoundReport, FoundReportResponse, LostPet, LostPetStatus, MatchRules, ReportStatus,
    ScoredCandidate, Sex, Size, Species,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // The matcher is usable straight from the crate root
        let matcher = Matcher::with_default_rules();
        assert_eq!(matcher.rules().score_threshold, 50);

        let d = haversine_distance(-23.5505, -46.6333, -23.5505, -46.6333);
        assert_eq!(d, 0.0);
    }
}
