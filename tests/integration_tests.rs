// Integration tests for the SOS Pets matching pipeline

use chrono::{NaiveDate, Utc};
use sospets_match::core::{haversine_distance, Matcher};
use sospets_match::models::{
    FoundReport, LostPet, LostPetStatus, MatchRules, ReportStatus, Sex, Size, Species,
};

const SE_LAT: f64 = -23.5505;
const SE_LON: f64 = -46.6333;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_lost_pet(
    id: i64,
    species: Species,
    color: &str,
    size: Size,
    city: &str,
    lat: f64,
    lon: f64,
    date_lost: NaiveDate,
) -> LostPet {
    LostPet {
        id,
        owner_id: format!("owner-{}", id),
        name: format!("Pet {}", id),
        species,
        breed: None,
        color: color.to_string(),
        size,
        sex: Sex::Unknown,
        distinguishing_marks: None,
        description: "Perdido".to_string(),
        date_lost,
        latitude: lat,
        longitude: lon,
        address: "Rua A".to_string(),
        neighborhood: "Centro".to_string(),
        city: city.to_string(),
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

fn create_found_report() -> FoundReport {
    FoundReport {
        id: 100,
        reporter_user_id: Some("finder-1".to_string()),
        reporter_name: "Maria".to_string(),
        contact_phone: "11988888888".to_string(),
        contact_email: "maria@email.com".to_string(),
        species: Species::Dog,
        color: "marrom claro".to_string(),
        size: Size::Small,
        sex: Sex::Unknown,
        description: "Encontrado no parque".to_string(),
        distinguishing_marks: None,
        date_found: date(2024, 5, 10),
        latitude: SE_LAT,
        longitude: SE_LON,
        address: "Praça da Sé".to_string(),
        neighborhood: "Sé".to_string(),
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

#[test]
fn test_end_to_end_matching_pass() {
    let matcher = Matcher::with_default_rules();
    let report = create_found_report();

    let pool = vec![
        // Near-perfect match around the corner: color is a substring match
        create_lost_pet(1, Species::Dog, "marrom", Size::Small, "São Paulo", -23.5510, -46.6340, date(2024, 5, 1)),
        // Species only: wrong size, unrelated color, other side of town
        create_lost_pet(2, Species::Dog, "preto", Size::Large, "São Paulo", -23.70, -46.80, date(2024, 5, 1)),
        // Wrong species
        create_lost_pet(3, Species::Cat, "marrom", Size::Small, "São Paulo", -23.5510, -46.6340, date(2024, 5, 1)),
        // Right everything, wrong city
        create_lost_pet(4, Species::Dog, "marrom", Size::Small, "Campinas", -22.9099, -47.0626, date(2024, 5, 1)),
        // Outside the 60-day window
        create_lost_pet(5, Species::Dog, "marrom", Size::Small, "São Paulo", -23.5510, -46.6340, date(2024, 2, 1)),
    ];

    let outcome = matcher.find_candidates(&report, pool);

    assert_eq!(outcome.total_evaluated, 5);
    assert_eq!(outcome.candidates.len(), 1);
    assert_eq!(outcome.candidates[0].lost_pet_id, 1);
    assert_eq!(outcome.candidates[0].score, 100);
}

#[test]
fn test_candidates_ranked_best_first() {
    let matcher = Matcher::with_default_rules();
    let report = create_found_report();

    let pool = vec![
        // 30 + 20 + 15 + 10 = 75 (color mismatch, both distance bands)
        create_lost_pet(1, Species::Dog, "preto", Size::Small, "São Paulo", -23.5520, -46.6340, date(2024, 5, 1)),
        // Full 100 a bit further out
        create_lost_pet(2, Species::Dog, "marrom", Size::Small, "São Paulo", -23.5650, -46.6450, date(2024, 5, 1)),
        // Same 75 as pet 1, but further away
        create_lost_pet(3, Species::Dog, "preto", Size::Small, "São Paulo", -23.5560, -46.6380, date(2024, 5, 1)),
    ];

    let outcome = matcher.find_candidates(&report, pool);

    let ids: Vec<i64> = outcome.candidates.iter().map(|c| c.lost_pet_id).collect();
    assert_eq!(ids, vec![2, 1, 3]);

    for pair in outcome.candidates.windows(2) {
        assert!(pair[0].score >= pair[1].score, "candidates not sorted by score");
    }
}

#[test]
fn test_custom_rules_change_the_threshold() {
    // With a stricter threshold the same pool produces fewer candidates
    let strict = Matcher::new(MatchRules {
        score_threshold: 80,
        ..MatchRules::default()
    });
    let report = create_found_report();

    let pool = vec![
        // Scores 75 under default rules
        create_lost_pet(1, Species::Dog, "preto", Size::Small, "São Paulo", -23.5520, -46.6340, date(2024, 5, 1)),
        // Scores 100
        create_lost_pet(2, Species::Dog, "marrom", Size::Small, "São Paulo", -23.5510, -46.6335, date(2024, 5, 1)),
    ];

    let outcome = strict.find_candidates(&report, pool);

    assert_eq!(outcome.candidates.len(), 1);
    assert_eq!(outcome.candidates[0].lost_pet_id, 2);
}

#[test]
fn test_malformed_rows_do_not_abort_the_pass() {
    let matcher = Matcher::with_default_rules();
    let report = create_found_report();

    let mut corrupted = create_lost_pet(1, Species::Dog, "marrom", Size::Small, "São Paulo", 0.0, 0.0, date(2024, 5, 1));
    corrupted.latitude = f64::NAN;
    corrupted.longitude = f64::INFINITY;

    let pool = vec![
        corrupted,
        create_lost_pet(2, Species::Dog, "marrom", Size::Small, "São Paulo", -23.5510, -46.6340, date(2024, 5, 1)),
    ];

    let outcome = matcher.find_candidates(&report, pool);

    assert_eq!(outcome.candidates.len(), 1);
    assert_eq!(outcome.candidates[0].lost_pet_id, 2);
}

#[test]
fn test_distance_accuracy() {
    // Same point is zero
    assert_eq!(haversine_distance(SE_LAT, SE_LON, SE_LAT, SE_LON), 0.0);

    // Sé to Paulista, roughly 2.5 km
    let distance = haversine_distance(SE_LAT, SE_LON, -23.5613, -46.6561);
    assert!(distance > 2.0 && distance < 3.0, "got {} km", distance);

    // São Paulo to Rio de Janeiro, approximately 360 km
    let distance = haversine_distance(SE_LAT, SE_LON, -22.9068, -43.1729);
    assert!((distance - 360.0).abs() < 15.0, "got {} km", distance);
}

#[test]
fn test_empty_pool_yields_empty_outcome() {
    let matcher = Matcher::with_default_rules();
    let report = create_found_report();

    let outcome = matcher.find_candidates(&report, Vec::new());

    assert!(outcome.candidates.is_empty());
    assert_eq!(outcome.total_evaluated, 0);
}
