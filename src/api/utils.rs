// src/api/utils.rs

use actix_web::cookie::Cookie;
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder};
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::web;
use log::{debug, warn};
use uuid::Uuid;

use crate::api::types::ErrorResponse;

pub const SESSION_COOKIE: &str = "session_id";

/// Session the request belongs to
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    /// True when the id was minted for this request and must be sent back
    pub is_new: bool,
}

/// Read the session id from the request cookie, or mint a new one
pub fn resolve_session(req: &HttpRequest) -> Session {
    match req.cookie(SESSION_COOKIE) {
        Some(cookie) if !cookie.value().trim().is_empty() => Session {
            id: cookie.value().to_string(),
            is_new: false,
        },
        _ => {
            let id = Uuid::new_v4().to_string();
            debug!("🍪 Issuing new session {}", id);
            Session { id, is_new: true }
        }
    }
}

/// Start a response, attaching the session cookie when it is new
pub fn respond(mut builder: HttpResponseBuilder, session: &Session) -> HttpResponseBuilder {
    if session.is_new {
        builder.cookie(
            Cookie::build(SESSION_COOKIE, session.id.clone())
                .path("/")
                .http_only(true)
                .finish(),
        );
    }
    builder
}

pub fn error_response(builder: HttpResponseBuilder, session: &Session, message: impl Into<String>) -> HttpResponse {
    let message = message.into();
    warn!("❌ {}", message);
    respond(builder, session).json(ErrorResponse::new(message))
}

/// JSON extractor config that reports malformed bodies as 400 ErrorResponse
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req| {
        let message = format!("Invalid request body: {}", err);
        warn!("❌ {}", message);
        InternalError::from_response(err, HttpResponse::BadRequest().json(ErrorResponse::new(message))).into()
    })
}
