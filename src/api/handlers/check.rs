// src/api/handlers/check.rs

use actix_web::{web, HttpResponse};
use log::{debug, warn};

use crate::api::types::{CheckRequest, CheckResult, ErrorResponse};
use crate::strength::{self, COMMON_PASSWORD_SUGGESTION};

/// Check password strength
///
/// Scores the submitted password and returns suggestions for improving it.
#[utoipa::path(
    post,
    path = "/check",
    tag = "Strength",
    request_body = CheckRequest,
    responses(
        (status = 200, description = "Strength report", body = CheckResult),
        (status = 400, description = "No password provided", body = ErrorResponse)
    )
)]
pub async fn check_password(check_req: web::Json<CheckRequest>) -> HttpResponse {
    let password = check_req.into_inner().password;

    if password.is_empty() {
        warn!("❌ Strength check without a password");
        return HttpResponse::BadRequest().json(ErrorResponse::new("No password provided"));
    }

    let estimate = strength::estimate(&password);
    let analysis = strength::analyze_patterns(&password);
    let mut feedback = strength::suggestions(&analysis, &estimate);

    let common_password = estimate.is_common();
    if common_password && !feedback.iter().any(|hint| hint == COMMON_PASSWORD_SUGGESTION) {
        feedback.push(COMMON_PASSWORD_SUGGESTION.to_string());
    }

    debug!("🔍 Checked password of {} chars: score {}", analysis.length, estimate.score);

    HttpResponse::Ok().json(CheckResult {
        strength: estimate.label().to_string(),
        score: estimate.score,
        score_percent: estimate.score_percent(),
        crack_time: estimate.crack_time,
        feedback,
        analysis,
        entropy: estimate.entropy,
        common_password,
    })
}
