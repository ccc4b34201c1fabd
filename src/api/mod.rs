// src/api/mod.rs
use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{middleware, web, App, HttpServer};
use actix_cors::Cors;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use utoipa_redoc::{Redoc, Servable};

use crate::core::config::Config;
use self::session::HistoryStore;

// This will hold our API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::generator::generate_password,
        crate::api::handlers::check::check_password,
        crate::api::handlers::analyze::deep_analyze,
        crate::api::handlers::history::get_history,
        crate::api::handlers::history::clear_history,
        crate::api::handlers::export::export_passwords
    ),
    components(
        schemas(
            crate::models::GenerationMethod,
            crate::models::GenerationRequest,
            crate::models::CharacterSets,
            crate::models::PasswordAnalysis,
            crate::models::HistoryEntry,
            crate::api::types::GenerationResult,
            crate::api::types::CheckRequest,
            crate::api::types::CheckResult,
            crate::api::types::HistoryResponse,
            crate::api::types::AckResponse,
            crate::api::types::ErrorResponse,
            crate::api::types::AnalyzeRequest,
            crate::api::types::StrengthSummary,
            crate::api::types::PatternsDetected,
            crate::api::types::DeepAnalysis,
            crate::api::types::ExportFormat,
            crate::api::types::ExportRequest,
            crate::api::types::ExportEntry,
            crate::api::types::ExportResponse
        )
    ),
    tags(
        (name = "Generator", description = "Password generation endpoints"),
        (name = "Strength", description = "Strength scoring and analysis endpoints"),
        (name = "History", description = "Per-session generation history"),
        (name = "Export", description = "Password list export")
    ),
    info(
        title = "passforge API",
        version = "0.1.0",
        description = "Password generator and strength checker API",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

pub async fn start_server(config: &Config) -> std::io::Result<()> {
    log::info!(
        "Starting passforge API server on {}:{}",
        config.web_address,
        config.web_port
    );

    let listener = TcpListener::bind((config.web_address.as_str(), config.web_port))?;
    let history = HistoryStore::with_session_limit(config.history_limit, config.session_limit);
    serve(listener, history)?.await
}

/// Build the server on an already bound listener
pub fn serve(listener: TcpListener, history: HistoryStore) -> std::io::Result<Server> {
    // Shared by every worker
    let history = web::Data::new(history);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec!["Content-Type", "Accept", "X-Requested-With"])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(history.clone())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi())
            )
            .service(Redoc::with_url("/redoc", ApiDoc::openapi()))
            .configure(routes::configure_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub mod types;
pub mod routes;
pub mod handlers;
pub mod session;
pub mod utils;
