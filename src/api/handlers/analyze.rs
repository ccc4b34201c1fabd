// src/api/handlers/analyze.rs

use actix_web::{web, HttpResponse};
use log::warn;

use crate::api::types::{AnalyzeRequest, DeepAnalysis, ErrorResponse, PatternsDetected, StrengthSummary};
use crate::strength;

/// Deep password analysis
///
/// Character distribution, detected patterns and similarity to a username.
#[utoipa::path(
    post,
    path = "/analyze",
    tag = "Strength",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Detailed analysis", body = DeepAnalysis),
        (status = 400, description = "No password provided", body = ErrorResponse)
    )
)]
pub async fn deep_analyze(analyze_req: web::Json<AnalyzeRequest>) -> HttpResponse {
    let AnalyzeRequest { password, username } = analyze_req.into_inner();

    if password.is_empty() {
        warn!("❌ Deep analysis without a password");
        return HttpResponse::BadRequest().json(ErrorResponse::new("No password provided"));
    }

    let estimate = strength::estimate(&password);
    let analysis = strength::analyze_patterns(&password);

    let patterns_detected = PatternsDetected {
        sequential: analysis.sequential_chars > 0,
        repeated: analysis.repeating_chars > 0,
        keyboard_pattern: analysis.keyboard_patterns > 0,
        common_password: estimate.is_common(),
    };

    let username_similarity = username
        .as_deref()
        .map(|name| strength::username_similarity(name, &password))
        .unwrap_or(0);

    HttpResponse::Ok().json(DeepAnalysis {
        character_distribution: strength::character_distribution(&password),
        basic_analysis: analysis,
        strength: StrengthSummary {
            score: estimate.score,
            strength: estimate.label().to_string(),
            crack_time: estimate.crack_time.clone(),
            entropy: estimate.entropy,
            guesses: estimate.guesses,
            warning: estimate.warning.clone(),
            suggestions: estimate.suggestions.clone(),
        },
        username_similarity,
        patterns_detected,
    })
}
