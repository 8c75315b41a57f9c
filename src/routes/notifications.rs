use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;

use crate::models::NotificationsQuery;
use crate::routes::{store_error_response, AppState};

/// Configure all notification routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/notifications", web::get().to(list_notifications))
        .route("/notifications/{id}/read", web::post().to(mark_read))
        .route("/notifications/read-all", web::post().to(mark_all_read));
}

/// List a user's notifications
///
/// GET /api/v1/notifications?userId={userId}
async fn list_notifications(
    state: web::Data<AppState>,
    query: web::Query<NotificationsQuery>,
) -> impl Responder {
    match state.db.list_notifications(&query.user_id).await {
        Ok(notifications) => {
            let count = notifications.len();
            HttpResponse::Ok().json(serde_json::json!({
                "userId": query.user_id,
                "notifications": notifications,
                "count": count,
            }))
        }
        Err(e) => store_error_response("Failed to list notifications", e),
    }
}

/// Mark one notification as read
///
/// POST /api/v1/notifications/{id}/read
async fn mark_read(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match state.db.mark_notification_read(path.into_inner()).await {
        Ok(notification) => HttpResponse::Ok().json(notification),
        Err(e) => store_error_response("Failed to mark notification read", e),
    }
}

/// Mark every notification of a user as read
///
/// POST /api/v1/notifications/read-all?userId={userId}
async fn mark_all_read(
    state: web::Data<AppState>,
    query: web::Query<NotificationsQuery>,
) -> impl Responder {
    match state.db.mark_all_notifications_read(&query.user_id).await {
        Ok(updated) => HttpResponse::Ok().json(serde_json::json!({
            "detail": "Todas as notificações foram marcadas como lidas.",
            "updated": updated,
        })),
        Err(e) => store_error_response("Failed to mark notifications read", e),
    }
}
