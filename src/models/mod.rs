// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    FoundReport, LostPet, LostPetStatus, MatchRules, Notification, NotificationKind, ReportStatus,
    ScoredCandidate, Sex, Size, Species,
};
pub use requests::{
    ConfirmMatchRequest, CreateFoundReportRequest, CreateLostPetRequest, ListLostPetsQuery,
    ListReportsQuery, NotificationsQuery, RejectReportRequest,
};
pub use responses::{ErrorResponse, FoundReportResponse, HealthResponse};
