// src/api/routes.rs
use actix_web::web;
use super::handlers;
use super::utils::json_config;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());

    // Generation
    cfg.route("/generate", web::post().to(handlers::generator::generate_password));

    // Strength checks
    cfg.route("/check", web::post().to(handlers::check::check_password))
        .route("/analyze", web::post().to(handlers::analyze::deep_analyze));

    // Session history; /history/clear is kept as an alias of /clear-history
    cfg.route("/history", web::get().to(handlers::history::get_history))
        .route("/clear-history", web::post().to(handlers::history::clear_history))
        .route("/history/clear", web::post().to(handlers::history::clear_history));

    // Export
    cfg.route("/export", web::post().to(handlers::export::export_passwords));
}
