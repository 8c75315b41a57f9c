use serde::{Deserialize, Serialize};

use crate::models::domain::{FoundReport, ScoredCandidate};

/// Response for found-report endpoints: the stored report plus the candidate
/// set the matching pass attached to it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoundReportResponse {
    pub report: FoundReport,
    pub candidates: Vec<ScoredCandidate>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
