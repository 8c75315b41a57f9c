use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Sex, Size, Species};

/// Request to register a lost pet
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLostPetRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "owner_id", rename = "ownerId")]
    pub owner_id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub species: Species,
    #[serde(default)]
    pub breed: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub color: String,
    pub size: Size,
    #[serde(default)]
    pub sex: Sex,
    #[serde(alias = "distinguishingMarks", rename = "distinguishingMarks", default)]
    pub distinguishing_marks: Option<String>,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(alias = "date_lost", rename = "dateLost")]
    pub date_lost: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    #[validate(length(min = 1, max = 100))]
    pub neighborhood: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 2, max = 2))]
    pub state: String,
    #[validate(length(min = 1, max = 15))]
    #[serde(alias = "contact_phone", rename = "contactPhone")]
    pub contact_phone: String,
    #[validate(email)]
    #[serde(alias = "contact_email", rename = "contactEmail")]
    pub contact_email: String,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(alias = "offersReward", rename = "offersReward", default)]
    pub offers_reward: bool,
    #[serde(alias = "rewardAmount", rename = "rewardAmount", default)]
    pub reward_amount: Option<f64>,
}

/// Request to report a found pet
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFoundReportRequest {
    #[serde(alias = "reporterUserId", rename = "reporterUserId", default)]
    pub reporter_user_id: Option<String>,
    #[validate(length(min = 1, max = 100))]
    #[serde(alias = "reporter_name", rename = "reporterName")]
    pub reporter_name: String,
    #[validate(length(min = 1, max = 15))]
    #[serde(alias = "contact_phone", rename = "contactPhone")]
    pub contact_phone: String,
    #[validate(email)]
    #[serde(alias = "contact_email", rename = "contactEmail")]
    pub contact_email: String,
    pub species: Species,
    #[validate(length(min = 1, max = 100))]
    pub color: String,
    pub size: Size,
    #[serde(default)]
    pub sex: Sex,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(alias = "distinguishingMarks", rename = "distinguishingMarks", default)]
    pub distinguishing_marks: Option<String>,
    #[serde(alias = "date_found", rename = "dateFound")]
    pub date_found: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    #[validate(length(min = 1, max = 100))]
    pub neighborhood: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 2, max = 2))]
    pub state: String,
    #[serde(alias = "petWithReporter", rename = "petWithReporter", default = "default_true")]
    pub pet_with_reporter: bool,
    #[serde(alias = "tempLocation", rename = "tempLocation", default)]
    pub temp_location: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Admin request to confirm one candidate as the true match
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConfirmMatchRequest {
    #[serde(alias = "lost_pet_id", rename = "lostPetId")]
    pub lost_pet_id: i64,
    #[validate(length(min = 1))]
    pub reviewer: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Admin request to dismiss a found report
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RejectReportRequest {
    #[validate(length(min = 1))]
    pub reviewer: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Query parameters for lost-pet listings
///
/// All filters are free-text and resolved case-insensitively; unknown enum
/// values surface as a 400 in the handler rather than silently matching
/// nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListLostPetsQuery {
    pub species: Option<String>,
    pub size: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub status: Option<String>,
    /// Substring match on the pet's name
    pub q: Option<String>,
}

/// Query parameters for found-report listings
#[derive(Debug, Clone, Deserialize)]
pub struct ListReportsQuery {
    pub status: Option<String>,
}

/// Query parameters for notification listings
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationsQuery {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}
