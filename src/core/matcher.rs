use crate::core::{filters::is_eligible_candidate, scoring::score_candidate};
use crate::models::{FoundReport, LostPet, MatchRules, ScoredCandidate};

/// Result of a matching pass
#[derive(Debug)]
pub struct MatchOutcome {
    /// Candidates clearing the score threshold, best first
    pub candidates: Vec<ScoredCandidate>,
    /// How many lost-pet records the pass looked at
    pub total_evaluated: usize,
}

/// Matching orchestrator for found-pet reports
///
/// Runs the full pass over a pre-loaded pool of lost-pet records:
/// eligibility filter, coordinate plausibility guard, scoring, threshold,
/// and ranking. Pure in-memory computation; the caller owns persistence.
#[derive(Debug, Clone)]
pub struct Matcher {
    rules: MatchRules,
}

impl Matcher {
    pub fn new(rules: MatchRules) -> Self {
        Self { rules }
    }

    pub fn with_default_rules() -> Self {
        Self {
            rules: MatchRules::default(),
        }
    }

    pub fn rules(&self) -> &MatchRules {
        &self.rules
    }

    /// Find candidate lost-pet records for a found report
    ///
    /// Records with implausible coordinates are skipped with a diagnostic
    /// instead of failing the whole pass; a report with implausible
    /// coordinates yields an empty candidate set for the same reason.
    ///
    /// # Returns
    /// Candidates with score >= threshold, sorted by score (descending) and
    /// then distance (ascending).
    pub fn find_candidates(&self, report: &FoundReport, lost_pets: Vec<LostPet>) -> MatchOutcome {
        let total_evaluated = lost_pets.len();

        if !plausible_coordinates(report.latitude, report.longitude) {
            tracing::warn!(
                "found report {} has implausible coordinates ({}, {}), skipping matching pass",
                report.id,
                report.latitude,
                report.longitude
            );
            return MatchOutcome {
                candidates: Vec::new(),
                total_evaluated,
            };
        }

        let mut candidates: Vec<ScoredCandidate> = lost_pets
            .into_iter()
            .filter(|lost| is_eligible_candidate(lost, report, self.rules.window_days))
            .filter_map(|lost| {
                if !plausible_coordinates(lost.latitude, lost.longitude) {
                    tracing::warn!(
                        "skipping lost pet {} with implausible coordinates ({}, {})",
                        lost.id,
                        lost.latitude,
                        lost.longitude
                    );
                    return None;
                }

                let scored = score_candidate(report, &lost, &self.rules);
                if scored.score >= self.rules.score_threshold {
                    Some(ScoredCandidate {
                        lost_pet_id: lost.id,
                        score: scored.score,
                        distance_km: scored.distance_km,
                    })
                } else {
                    None
                }
            })
            .collect();

        // Best score first; ties broken by proximity
        candidates.sort_by(|a, b| {
            b.score.cmp(&a.score).then_with(|| {
                a.distance_km
                    .partial_cmp(&b.distance_km)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        });

        MatchOutcome {
            candidates,
            total_evaluated,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

/// Whether a coordinate pair can be scored at all
///
/// The distance function itself accepts anything; this guard keeps corrupted
/// rows from poisoning a matching pass.
#[inline]
pub fn plausible_coordinates(lat: f64, lon: f64) -> bool {
    lat.is_finite() && lon.is_finite() && (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}
