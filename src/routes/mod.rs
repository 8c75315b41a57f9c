// Route exports
pub mod lost_pets;
pub mod notifications;
pub mod reports;

use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::core::Matcher;
use crate::models::{ErrorResponse, HealthResponse};
use crate::services::{PostgresClient, PostgresError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PostgresClient>,
    pub matcher: Matcher,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(lost_pets::configure)
            .configure(reports::configure)
            .configure(notifications::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.db.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Map a store error onto the JSON error envelope
pub(crate) fn store_error_response(context: &str, err: PostgresError) -> HttpResponse {
    match err {
        PostgresError::NotFound(what) => HttpResponse::NotFound().json(ErrorResponse {
            error: "not_found".to_string(),
            message: what,
            status_code: 404,
        }),
        PostgresError::Conflict(message) => HttpResponse::Conflict().json(ErrorResponse {
            error: "conflict".to_string(),
            message,
            status_code: 409,
        }),
        PostgresError::InvalidInput(message) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "invalid_input".to_string(),
            message,
            status_code: 400,
        }),
        err => {
            tracing::error!("{}: {}", context, err);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: context.to_string(),
                message: err.to_string(),
                status_code: 500,
            })
        }
    }
}

/// 400 for requests that fail DTO validation
pub(crate) fn validation_error_response(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}
