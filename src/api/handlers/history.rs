// src/api/handlers/history.rs

use actix_web::{web, HttpRequest, HttpResponse};
use log::{error, info};

use crate::api::session::HistoryStore;
use crate::api::types::{AckResponse, ErrorResponse, HistoryResponse};
use crate::api::utils::{error_response, resolve_session, respond};

/// Get password history
///
/// Returns the passwords generated in this session, newest first.
#[utoipa::path(
    get,
    path = "/history",
    tag = "History",
    responses(
        (status = 200, description = "Session history", body = HistoryResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn get_history(req: HttpRequest, history: web::Data<HistoryStore>) -> HttpResponse {
    let session = resolve_session(&req);

    match history.list(&session.id) {
        Ok(entries) => respond(HttpResponse::Ok(), &session).json(HistoryResponse { history: entries }),
        Err(e) => {
            error!("Error getting history: {}", e);
            error_response(
                HttpResponse::InternalServerError(),
                &session,
                format!("Error getting history: {}", e),
            )
        }
    }
}

/// Clear password history
///
/// Removes every history entry of this session.
#[utoipa::path(
    post,
    path = "/clear-history",
    tag = "History",
    responses(
        (status = 200, description = "History cleared", body = AckResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn clear_history(req: HttpRequest, history: web::Data<HistoryStore>) -> HttpResponse {
    let session = resolve_session(&req);

    match history.clear(&session.id) {
        Ok(()) => {
            info!("🧹 Cleared history for session {}", session.id);
            respond(HttpResponse::Ok(), &session).json(AckResponse { success: true })
        }
        Err(e) => {
            error!("Error clearing history: {}", e);
            error_response(
                HttpResponse::InternalServerError(),
                &session,
                format!("Error clearing history: {}", e),
            )
        }
    }
}
