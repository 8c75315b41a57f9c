use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    ConfirmMatchRequest, CreateFoundReportRequest, ErrorResponse, FoundReport,
    FoundReportResponse, ListReportsQuery, RejectReportRequest, ReportStatus, ScoredCandidate,
};
use crate::routes::{store_error_response, validation_error_response, AppState};
use crate::services::PostgresError;

/// Configure all found-report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/reports", web::post().to(create_report))
        .route("/reports", web::get().to(list_reports))
        .route("/reports/{id}", web::get().to(get_report))
        .route("/reports/{id}/confirm", web::post().to(confirm_match))
        .route("/reports/{id}/reject", web::post().to(reject_report))
        .route("/reports/{id}/rematch", web::post().to(rematch_report));
}

/// Run the matching pass for a persisted report and store its candidate set
///
/// Loads the relational pre-filter pool, scores it in memory, and replaces
/// the report's candidates in one batch (which also moves a pendente report
/// to em_analise when anything qualified).
async fn run_matching_pass(
    state: &AppState,
    report: &FoundReport,
) -> Result<(FoundReport, Vec<ScoredCandidate>), PostgresError> {
    let pool = state
        .db
        .find_candidate_lost_pets(
            report.species,
            &report.city,
            &report.state,
            report.date_found,
            state.matcher.rules().window_days,
        )
        .await?;

    let outcome = state.matcher.find_candidates(report, pool);

    let updated = state
        .db
        .replace_candidates(report.id, &outcome.candidates)
        .await?;

    tracing::info!(
        "Matching pass for report {}: {} of {} candidates qualified",
        report.id,
        outcome.candidates.len(),
        outcome.total_evaluated
    );

    Ok((updated, outcome.candidates))
}

/// Submit a found-pet report
///
/// POST /api/v1/reports
///
/// The matching pass runs synchronously after the report is persisted, as a
/// best-effort enrichment: if it fails, the report is still created and the
/// response carries an empty candidate list.
async fn create_report(
    state: web::Data<AppState>,
    req: web::Json<CreateFoundReportRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_report: {}", errors);
        return validation_error_response(errors);
    }

    let report = match state.db.create_found_report(&req).await {
        Ok(report) => report,
        Err(e) => return store_error_response("Failed to create found report", e),
    };

    let (report, candidates) = match run_matching_pass(&state, &report).await {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(
                "Matching pass failed for report {}, returning it unmatched: {}",
                report.id,
                e
            );
            (report, Vec::new())
        }
    };

    HttpResponse::Created().json(FoundReportResponse { report, candidates })
}

/// List found reports
///
/// GET /api/v1/reports?status=
async fn list_reports(
    state: web::Data<AppState>,
    query: web::Query<ListReportsQuery>,
) -> impl Responder {
    let status = match &query.status {
        Some(raw) => match ReportStatus::parse(raw) {
            Some(status) => Some(status),
            None => {
                return HttpResponse::BadRequest().json(ErrorResponse {
                    error: "invalid_filter".to_string(),
                    message: format!("unknown status: {}", raw),
                    status_code: 400,
                });
            }
        },
        None => None,
    };

    match state.db.list_found_reports(status).await {
        Ok(reports) => HttpResponse::Ok().json(reports),
        Err(e) => store_error_response("Failed to list reports", e),
    }
}

/// Fetch one found report with its candidate set
///
/// GET /api/v1/reports/{id}
async fn get_report(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();

    let report = match state.db.get_found_report(id).await {
        Ok(report) => report,
        Err(e) => return store_error_response("Failed to fetch report", e),
    };

    match state.db.get_report_candidates(id).await {
        Ok(candidates) => HttpResponse::Ok().json(FoundReportResponse { report, candidates }),
        Err(e) => store_error_response("Failed to fetch report candidates", e),
    }
}

/// Confirm one candidate as the true match
///
/// POST /api/v1/reports/{id}/confirm
///
/// Resolves the lost pet with a conditional update; a 409 means another
/// confirmation already claimed it and this report should be re-reviewed.
async fn confirm_match(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<ConfirmMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error_response(errors);
    }

    match state.db.confirm_match(path.into_inner(), &req).await {
        Ok((report, lost)) => HttpResponse::Ok().json(serde_json::json!({
            "report": report,
            "lostPet": lost,
        })),
        Err(e) => store_error_response("Failed to confirm match", e),
    }
}

/// Dismiss a found report
///
/// POST /api/v1/reports/{id}/reject
async fn reject_report(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<RejectReportRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error_response(errors);
    }

    match state.db.reject_report(path.into_inner(), &req).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => store_error_response("Failed to reject report", e),
    }
}

/// Re-run the matching pass for an unreviewed report
///
/// POST /api/v1/reports/{id}/rematch
///
/// The pass replaces the candidate set, so re-running it is idempotent and
/// picks up lost-pet records created after the report was filed. Reviewed
/// reports are immutable.
async fn rematch_report(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();

    let report = match state.db.get_found_report(id).await {
        Ok(report) => report,
        Err(e) => return store_error_response("Failed to fetch report", e),
    };

    if report.status.is_terminal() {
        return HttpResponse::Conflict().json(ErrorResponse {
            error: "conflict".to_string(),
            message: format!("report {} was already reviewed", id),
            status_code: 409,
        });
    }

    match run_matching_pass(&state, &report).await {
        Ok((report, candidates)) => {
            HttpResponse::Ok().json(FoundReportResponse { report, candidates })
        }
        Err(e) => store_error_response("Failed to re-run matching", e),
    }
}
