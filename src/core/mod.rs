// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use distance::haversine_distance;
pub use filters::is_eligible_candidate;
pub use matcher::{plausible_coordinates, MatchOutcome, Matcher};
pub use scoring::{colors_similar, score_candidate, CandidateScore};
