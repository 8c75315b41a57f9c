use crate::core::distance::haversine_distance;
use crate::models::{FoundReport, LostPet, MatchRules};

/// Score of one lost-pet record against a found report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateScore {
    pub score: u32,
    pub distance_km: f64,
}

/// Compute the similarity score between a found report and one eligible
/// lost-pet record
///
/// Points are additive and independent, with no normalization:
/// - species match (the filter already guarantees it, so this is the
///   baseline every candidate starts from)
/// - exact size (porte) match
/// - color similarity: either color string contains the other,
///   case-insensitively
/// - distance inside the outer band, plus a stacking bonus inside the
///   inner band
pub fn score_candidate(report: &FoundReport, lost: &LostPet, rules: &MatchRules) -> CandidateScore {
    let mut score = 0;

    if lost.species == report.species {
        score += rules.species_points;
    }

    if lost.size == report.size {
        score += rules.size_points;
    }

    if colors_similar(&report.color, &lost.color) {
        score += rules.color_points;
    }

    let distance_km = haversine_distance(
        report.latitude,
        report.longitude,
        lost.latitude,
        lost.longitude,
    );

    if distance_km <= rules.near_distance_km {
        score += rules.near_points;
        if distance_km <= rules.very_near_distance_km {
            score += rules.very_near_points;
        }
    }

    CandidateScore { score, distance_km }
}

/// Bidirectional substring comparison over trimmed lowercase color strings
///
/// "marrom" matches "marrom claro" and vice versa. Transpositions, synonyms
/// and typos do not match; this is the platform's long-standing heuristic and
/// listings rely on its exact behavior.
#[inline]
pub fn colors_similar(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    a.contains(b.as_str()) || b.contains(a.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LostPetStatus, ReportStatus, Sex, Size, Species};
    use chrono::{NaiveDate, Utc};

    fn lost_pet(color: &str, size: Size, lat: f64, lon: f64) -> LostPet {
        LostPet {
            id: 1,
            owner_id: "owner-1".to_string(),
            name: "Totó".to_string(),
            species: Species::Dog,
            breed: None,
            color: color.to_string(),
            size,
            sex: Sex::Male,
            distinguishing_marks: None,
            description: "Fugiu pelo portão".to_string(),
            date_lost: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            latitude: lat,
            longitude: lon,
            address: "Praça da Sé".to_string(),
            neighborhood: "Sé".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            contact_phone: "11999999999".to_string(),
            contact_email: "dono@email.com".to_string(),
            whatsapp: None,
            offers_reward: false,
            reward_amount: None,
            status: LostPetStatus::Lost,
            active: true,
            views: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            found_at: None,
        }
    }

    fn found_report(color: &str, size: Size, lat: f64, lon: f64) -> FoundReport {
        FoundReport {
            id: 10,
            reporter_user_id: None,
            reporter_name: "Maria".to_string(),
            contact_phone: "11988888888".to_string(),
            contact_email: "maria@email.com".to_string(),
            species: Species::Dog,
            color: color.to_string(),
            size,
            sex: Sex::Unknown,
            description: "Encontrado no parque".to_string(),
            distinguishing_marks: None,
            date_found: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            latitude: lat,
            longitude: lon,
            address: "Parque".to_string(),
            neighborhood: "Centro".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            pet_with_reporter: true,
            temp_location: None,
            status: ReportStatus::Pending,
            confirmed_lost_pet_id: None,
            reviewed_by: None,
            admin_notes: None,
            owner_notified: false,
            created_at: Utc::now(),
            reviewed_at: None,
            updated_at: Utc::now(),
        }
    }

    const SE_LAT: f64 = -23.5505;
    const SE_LON: f64 = -46.6333;

    #[test]
    fn test_perfect_match_scores_maximum() {
        let report = found_report("marrom", Size::Small, SE_LAT, SE_LON);
        let lost = lost_pet("marrom", Size::Small, SE_LAT, SE_LON);

        let scored = score_candidate(&report, &lost, &MatchRules::default());
        assert_eq!(scored.score, 100);
        assert_eq!(scored.distance_km, 0.0);
    }

    #[test]
    fn test_species_only_scores_thirty() {
        // Same species but different size, unrelated color, and far away
        let report = found_report("preto", Size::Small, SE_LAT, SE_LON);
        let lost = lost_pet("branco", Size::Large, -22.9068, -43.1729);

        let scored = score_candidate(&report, &lost, &MatchRules::default());
        assert_eq!(scored.score, 30);
    }

    #[test]
    fn test_species_size_and_mid_distance_scores_sixty_five() {
        // ~5 km north of Sé: inside the 10 km band, outside the 3 km band
        let report = found_report("preto", Size::Small, SE_LAT, SE_LON);
        let lost = lost_pet("branco", Size::Small, SE_LAT + 0.045, SE_LON);

        let scored = score_candidate(&report, &lost, &MatchRules::default());
        assert!(scored.distance_km > 3.0 && scored.distance_km < 10.0);
        assert_eq!(scored.score, 65);
    }

    #[test]
    fn test_distance_bands_stack() {
        let rules = MatchRules::default();
        let report = found_report("preto", Size::Large, SE_LAT, SE_LON);

        // ~2 km away: both bands apply
        let close = lost_pet("branco", Size::Small, SE_LAT + 0.018, SE_LON);
        let scored = score_candidate(&report, &close, &rules);
        assert!(scored.distance_km < 3.0);
        assert_eq!(scored.score, 30 + 15 + 10);

        // ~8 km away: outer band only
        let near = lost_pet("branco", Size::Small, SE_LAT + 0.072, SE_LON);
        let scored = score_candidate(&report, &near, &rules);
        assert!(scored.distance_km > 3.0 && scored.distance_km < 10.0);
        assert_eq!(scored.score, 30 + 15);

        // ~20 km away: no distance points
        let far = lost_pet("branco", Size::Small, SE_LAT + 0.18, SE_LON);
        let scored = score_candidate(&report, &far, &rules);
        assert!(scored.distance_km > 10.0);
        assert_eq!(scored.score, 30);
    }

    #[test]
    fn test_color_substring_both_directions() {
        assert!(colors_similar("marrom", "marrom claro"));
        assert!(colors_similar("Marrom Claro", "marrom"));
        assert!(colors_similar("caramelo", "caramelo"));
        assert!(!colors_similar("preto", "branco"));
        // No synonym or typo tolerance
        assert!(!colors_similar("marrom", "maron"));
    }

    #[test]
    fn test_color_points_awarded_on_partial_name() {
        let report = found_report("marrom claro", Size::Large, SE_LAT, SE_LON);
        let lost = lost_pet("marrom", Size::Small, -22.9068, -43.1729);

        let scored = score_candidate(&report, &lost, &MatchRules::default());
        assert_eq!(scored.score, 30 + 25);
    }
}
