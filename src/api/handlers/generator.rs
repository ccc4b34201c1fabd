// src/api/handlers/generator.rs

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Local;
use log::{info, error};

use crate::api::session::HistoryStore;
use crate::api::types::{ErrorResponse, GenerationResult};
use crate::api::utils::{error_response, resolve_session, respond};
use crate::generators::PasswordGenerator;
use crate::models::{GenerationRequest, HistoryEntry};
use crate::strength;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Generate a password
///
/// Generates a password from the requested options, scores it and records it
/// in the session history.
#[utoipa::path(
    post,
    path = "/generate",
    tag = "Generator",
    request_body = GenerationRequest,
    responses(
        (status = 200, description = "Generated password", body = GenerationResult),
        (status = 400, description = "Invalid options", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn generate_password(
    req: HttpRequest,
    history: web::Data<HistoryStore>,
    generation_req: web::Json<GenerationRequest>,
) -> HttpResponse {
    let session = resolve_session(&req);
    let request = generation_req.into_inner();

    let generator = PasswordGenerator::new();
    let password = match generator.generate_password(&request) {
        Ok(pwd) => pwd,
        Err(e) => {
            return error_response(
                HttpResponse::BadRequest(),
                &session,
                format!("Failed to generate password: {}", e),
            );
        }
    };

    let estimate = strength::estimate(&password);
    let analysis = strength::analyze_patterns(&password);
    let feedback = strength::suggestions(&analysis, &estimate);

    let entry = HistoryEntry {
        password: password.clone(),
        score: estimate.score,
        crack_time: estimate.crack_time.clone(),
        timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
    };
    if let Err(e) = history.record(&session.id, entry) {
        error!("Failed to record history: {}", e);
        return error_response(
            HttpResponse::InternalServerError(),
            &session,
            format!("Error recording history: {}", e),
        );
    }

    info!(
        "🔐 Generated {} password ({} chars, score {})",
        request.method,
        password.chars().count(),
        estimate.score
    );

    respond(HttpResponse::Ok(), &session).json(GenerationResult {
        password,
        score: estimate.score,
        crack_time: estimate.crack_time,
        entropy: estimate.entropy,
        feedback,
        analysis: Some(analysis),
    })
}
