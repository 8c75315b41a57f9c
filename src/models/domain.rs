use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pet species
///
/// Wire and database values stay in Portuguese for compatibility with the
/// existing SOS Pets frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "species")]
pub enum Species {
    #[serde(rename = "cachorro")]
    #[sqlx(rename = "cachorro")]
    Dog,
    #[serde(rename = "gato")]
    #[sqlx(rename = "gato")]
    Cat,
    #[serde(rename = "outro")]
    #[sqlx(rename = "outro")]
    Other,
}

impl Species {
    /// Parse a query-parameter value, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "cachorro" => Some(Species::Dog),
            "gato" => Some(Species::Cat),
            "outro" => Some(Species::Other),
            _ => None,
        }
    }
}

/// Pet size (porte)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "pet_size")]
pub enum Size {
    #[serde(rename = "pequeno")]
    #[sqlx(rename = "pequeno")]
    Small,
    #[serde(rename = "medio")]
    #[sqlx(rename = "medio")]
    Medium,
    #[serde(rename = "grande")]
    #[sqlx(rename = "grande")]
    Large,
}

impl Size {
    /// Parse a query-parameter value, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pequeno" => Some(Size::Small),
            "medio" => Some(Size::Medium),
            "grande" => Some(Size::Large),
            _ => None,
        }
    }
}

/// Pet sex; `N` means not informed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "pet_sex")]
pub enum Sex {
    #[serde(rename = "M")]
    #[sqlx(rename = "M")]
    Male,
    #[serde(rename = "F")]
    #[sqlx(rename = "F")]
    Female,
    #[serde(rename = "N")]
    #[sqlx(rename = "N")]
    Unknown,
}

impl Default for Sex {
    fn default() -> Self {
        Sex::Unknown
    }
}

/// Lifecycle of a lost-pet record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "lost_pet_status")]
pub enum LostPetStatus {
    #[serde(rename = "perdido")]
    #[sqlx(rename = "perdido")]
    Lost,
    #[serde(rename = "encontrado")]
    #[sqlx(rename = "encontrado")]
    Found,
    #[serde(rename = "cancelado")]
    #[sqlx(rename = "cancelado")]
    Canceled,
}

/// Review lifecycle of a found-pet report
///
/// pendente -> em_analise (the matching pass attached at least one candidate)
/// or stays pendente (zero candidates); em_analise -> aprovado (admin confirms
/// one candidate) or -> rejeitado. aprovado and rejeitado are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "report_status")]
pub enum ReportStatus {
    #[serde(rename = "pendente")]
    #[sqlx(rename = "pendente")]
    Pending,
    #[serde(rename = "em_analise")]
    #[sqlx(rename = "em_analise")]
    UnderReview,
    #[serde(rename = "aprovado")]
    #[sqlx(rename = "aprovado")]
    Approved,
    #[serde(rename = "rejeitado")]
    #[sqlx(rename = "rejeitado")]
    Rejected,
}

impl ReportStatus {
    /// Parse a query-parameter value, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pendente" => Some(ReportStatus::Pending),
            "em_analise" => Some(ReportStatus::UnderReview),
            "aprovado" => Some(ReportStatus::Approved),
            "rejeitado" => Some(ReportStatus::Rejected),
            _ => None,
        }
    }

    /// Terminal states cannot be re-matched or re-reviewed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReportStatus::Approved | ReportStatus::Rejected)
    }
}

/// A pet reported missing by its owner
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LostPet {
    pub id: i64,
    #[serde(rename = "ownerId")]
    pub owner_id: String,
    pub name: String,
    pub species: Species,
    #[serde(default)]
    pub breed: Option<String>,
    pub color: String,
    pub size: Size,
    #[serde(default)]
    pub sex: Sex,
    #[serde(rename = "distinguishingMarks", default)]
    pub distinguishing_marks: Option<String>,
    pub description: String,
    #[serde(rename = "dateLost")]
    pub date_lost: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "contactPhone")]
    pub contact_phone: String,
    #[serde(rename = "contactEmail")]
    pub contact_email: String,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(rename = "offersReward", default)]
    pub offers_reward: bool,
    #[serde(rename = "rewardAmount", default)]
    pub reward_amount: Option<f64>,
    pub status: LostPetStatus,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub views: i32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "foundAt", default)]
    pub found_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// A report filed by someone who found a pet
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FoundReport {
    pub id: i64,
    #[serde(rename = "reporterUserId", default)]
    pub reporter_user_id: Option<String>,
    #[serde(rename = "reporterName")]
    pub reporter_name: String,
    #[serde(rename = "contactPhone")]
    pub contact_phone: String,
    #[serde(rename = "contactEmail")]
    pub contact_email: String,
    pub species: Species,
    pub color: String,
    pub size: Size,
    #[serde(default)]
    pub sex: Sex,
    pub description: String,
    #[serde(rename = "distinguishingMarks", default)]
    pub distinguishing_marks: Option<String>,
    #[serde(rename = "dateFound")]
    pub date_found: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "petWithReporter", default = "default_true")]
    pub pet_with_reporter: bool,
    #[serde(rename = "tempLocation", default)]
    pub temp_location: Option<String>,
    pub status: ReportStatus,
    #[serde(rename = "confirmedLostPetId", default)]
    pub confirmed_lost_pet_id: Option<i64>,
    #[serde(rename = "reviewedBy", default)]
    pub reviewed_by: Option<String>,
    #[serde(rename = "adminNotes", default)]
    pub admin_notes: Option<String>,
    #[serde(rename = "ownerNotified", default)]
    pub owner_notified: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "reviewedAt", default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// A lost-pet record attached to a found report by the matching pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(rename = "lostPetId")]
    pub lost_pet_id: i64,
    pub score: u32,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
}

/// Notification kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind")]
pub enum NotificationKind {
    #[serde(rename = "match_confirmado")]
    #[sqlx(rename = "match_confirmado")]
    MatchConfirmed,
    #[serde(rename = "reporte_rejeitado")]
    #[sqlx(rename = "reporte_rejeitado")]
    ReportRejected,
}

/// In-app notification delivered to a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(rename = "contactPhone", default)]
    pub contact_phone: Option<String>,
    #[serde(rename = "contactEmail", default)]
    pub contact_email: Option<String>,
    #[serde(rename = "read")]
    pub is_read: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Matching rules
///
/// All thresholds and point values the scorer and filter use, lifted out of
/// the code so they can be tuned from configuration.
#[derive(Debug, Clone, Copy)]
pub struct MatchRules {
    /// Trailing window before the found-date a lost record may fall in
    pub window_days: i64,
    /// Minimum total score for a lost record to become a candidate
    pub score_threshold: u32,
    pub species_points: u32,
    pub size_points: u32,
    pub color_points: u32,
    /// Outer distance band in kilometers
    pub near_distance_km: f64,
    pub near_points: u32,
    /// Inner distance band; its points stack on top of the outer band's
    pub very_near_distance_km: f64,
    pub very_near_points: u32,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            window_days: 60,
            score_threshold: 50,
            species_points: 30,
            size_points: 20,
            color_points: 25,
            near_distance_km: 10.0,
            near_points: 15,
            very_near_distance_km: 3.0,
            very_near_points: 10,
        }
    }
}
