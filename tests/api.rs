use actix_web::cookie::Cookie;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use passforge::api::routes::configure_routes;
use passforge::api::session::HistoryStore;
use passforge::api::types::{CheckResult, GenerationResult, HistoryResponse};
use passforge::strength::COMMON_PASSWORD_SUGGESTION;

const SESSION: &str = "session_id";

macro_rules! app {
    ($limit:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(HistoryStore::new($limit)))
                .configure(configure_routes),
        )
        .await
    };
}

fn generate_request(session: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/generate")
        .cookie(Cookie::new(SESSION, session.to_string()))
        .set_json(body)
}

fn history_request(session: &str) -> test::TestRequest {
    test::TestRequest::get()
        .uri("/history")
        .cookie(Cookie::new(SESSION, session.to_string()))
}

#[actix_web::test]
async fn test_generate_issues_session_cookie() {
    let app = app!(10);

    let req = test::TestRequest::post()
        .uri("/generate")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let session = resp
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION)
        .map(|cookie| cookie.value().to_string())
        .expect("session cookie");
    assert!(!session.is_empty());

    let result: GenerationResult = test::read_body_json(resp).await;
    assert_eq!(result.password.chars().count(), 16);
    assert!(result.score <= 4);
    assert!(result.entropy > 0.0);
    assert_eq!(result.analysis.map(|a| a.length), Some(16));

    // The issued cookie identifies the session that owns the entry
    let history: HistoryResponse = test::call_and_read_body_json(&app, history_request(&session).to_request()).await;
    assert_eq!(history.history.len(), 1);
    assert_eq!(history.history[0].password, result.password);
}

#[actix_web::test]
async fn test_history_is_newest_first_and_capped() {
    let app = app!(3);

    for length in 6..=9 {
        let resp = test::call_service(&app, generate_request("capped", json!({ "length": length })).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let history: HistoryResponse = test::call_and_read_body_json(&app, history_request("capped").to_request()).await;
    let lengths: Vec<usize> = history
        .history
        .iter()
        .map(|entry| entry.password.chars().count())
        .collect();
    assert_eq!(lengths, vec![9, 8, 7]);
    assert!(history.history.iter().all(|entry| !entry.timestamp.is_empty()));
}

#[actix_web::test]
async fn test_sessions_do_not_share_history() {
    let app = app!(10);

    test::call_service(&app, generate_request("alice", json!({})).to_request()).await;

    let history: HistoryResponse = test::call_and_read_body_json(&app, history_request("bob").to_request()).await;
    assert!(history.history.is_empty());
}

#[actix_web::test]
async fn test_clear_history_and_alias() {
    let app = app!(10);

    for path in ["/clear-history", "/history/clear"] {
        test::call_service(&app, generate_request("clearing", json!({})).to_request()).await;

        let req = test::TestRequest::post()
            .uri(path)
            .cookie(Cookie::new(SESSION, "clearing"))
            .to_request();
        let ack: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ack, json!({ "success": true }));

        let history: HistoryResponse = test::call_and_read_body_json(&app, history_request("clearing").to_request()).await;
        assert!(history.history.is_empty(), "{} left entries behind", path);
    }
}

#[actix_web::test]
async fn test_all_classes_off_generates_lowercase() {
    let app = app!(10);

    let body = json!({
        "length": 20,
        "uppercase": false,
        "lowercase": false,
        "digits": false,
        "symbols": false
    });
    let result: GenerationResult = test::call_and_read_body_json(&app, generate_request("lower", body).to_request()).await;
    assert_eq!(result.password.len(), 20);
    assert!(result.password.chars().all(|c| c.is_ascii_lowercase()));
}

#[actix_web::test]
async fn test_length_is_clamped() {
    let app = app!(10);

    let short: GenerationResult =
        test::call_and_read_body_json(&app, generate_request("clamp", json!({ "length": 2 })).to_request()).await;
    assert_eq!(short.password.chars().count(), 6);

    let long: GenerationResult =
        test::call_and_read_body_json(&app, generate_request("clamp", json!({ "length": 500, "method": "pin" })).to_request()).await;
    assert_eq!(long.password.chars().count(), 128);
    assert!(long.password.chars().all(|c| c.is_ascii_digit()));

    for length in [json!(-5), json!(-9_000_000_000_i64), json!(99_999_999_999_u64)] {
        let resp = test::call_service(&app, generate_request("clamp", json!({ "length": length })).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "length {} was rejected", length);

        let result: GenerationResult = test::read_body_json(resp).await;
        let expected = if length.as_i64().is_some_and(|l| l < 0) { 6 } else { 128 };
        assert_eq!(result.password.chars().count(), expected);
    }
}

#[actix_web::test]
async fn test_check_rejects_empty_password() {
    let app = app!(10);

    let req = test::TestRequest::post()
        .uri("/check")
        .set_json(json!({ "password": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "No password provided");
}

#[actix_web::test]
async fn test_check_flags_common_password() {
    let app = app!(10);

    let req = test::TestRequest::post()
        .uri("/check")
        .set_json(json!({ "password": "password" }))
        .to_request();
    let result: CheckResult = test::call_and_read_body_json(&app, req).await;

    assert_eq!(result.score, 0);
    assert_eq!(result.strength, "Very Weak");
    assert_eq!(result.score_percent, 0.0);
    assert!(result.common_password);
    assert!(result.feedback.iter().any(|f| f == COMMON_PASSWORD_SUGGESTION));
    assert_eq!(result.analysis.length, 8);
    assert_eq!(result.analysis.character_sets.lowercase, 8);
}

#[actix_web::test]
async fn test_analyze_reports_distribution() {
    let app = app!(10);

    let req = test::TestRequest::post()
        .uri("/analyze")
        .set_json(json!({ "password": "aab", "username": "aab" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["character_distribution"]["a"], 2);
    assert_eq!(body["character_distribution"]["b"], 1);
    assert_eq!(body["username_similarity"], 100);
    assert_eq!(body["basic_analysis"]["length"], 3);
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let app = app!(10);

    for payload in ["{not json", r#"{"method": "bogus"}"#] {
        let req = test::TestRequest::post()
            .uri("/generate")
            .insert_header(ContentType::json())
            .set_payload(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    }
}

#[actix_web::test]
async fn test_export_formats() {
    let app = app!(10);

    let req = test::TestRequest::post()
        .uri("/export")
        .set_json(json!({ "format": "CSV", "passwords": ["alpha", "be,ta"] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["format"], "csv");
    let csv = body["content"].as_str().unwrap();
    assert!(csv.starts_with("Password,Strength,Generated\n"));
    assert!(csv.contains("alpha,N/A,"));
    assert!(csv.contains("\"be,ta\",N/A,"));

    let req = test::TestRequest::post()
        .uri("/export")
        .set_json(json!({ "format": "json", "passwords": ["alpha"] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["content"][0]["password"], "alpha");

    let req = test::TestRequest::post()
        .uri("/export")
        .set_json(json!({ "format": "xml", "passwords": ["alpha"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_export_falls_back_to_history() {
    let app = app!(10);

    let generated: GenerationResult =
        test::call_and_read_body_json(&app, generate_request("exporter", json!({})).to_request()).await;

    let req = test::TestRequest::post()
        .uri("/export")
        .cookie(Cookie::new(SESSION, "exporter"))
        .set_json(json!({ "passwords": [] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["format"], "text");
    assert_eq!(body["content"], generated.password);
}
