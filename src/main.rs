use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use passforge::api;
use passforge::cli::{self, Args, CliCommand};
use passforge::client::storage::ensure_session_id;
use passforge::client::{ClientController, ClientError, Exporter, FavoritesStore, FileStore, HttpPasswordService};
use passforge::core::config::Config;
use passforge::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();

    let mut config = Config::load();
    args.apply(&mut config);

    logging::init(&config).context("failed to initialize logging")?;
    config.log_warnings();
    log::debug!("Loaded config: {:?}", config);

    if let Some(CliCommand::Serve { .. }) = args.command {
        log::info!("🔐 Starting passforge password service");
        return api::start_server(&config)
            .await
            .with_context(|| format!("API server failed on {}:{}", config.web_address, config.web_port));
    }

    let mut storage = FileStore::open(&config.storage_file)
        .with_context(|| format!("failed to open {}", config.storage_file.display()))?;
    let session_id = ensure_session_id(&mut storage).context("failed to store the session id")?;
    log::debug!("Using client session {}", session_id);

    let service = HttpPasswordService::new(&config.server_url, session_id, config.request_timeout)
        .context("failed to build the HTTP client")?;
    let favorites = FavoritesStore::load(storage);
    let exporter = Exporter::new(&config.export_directory);
    let mut controller = ClientController::new(service, favorites, exporter);

    match args.command {
        Some(command) => {
            let show_history = matches!(command, CliCommand::History);
            controller.subscribe(cli::view::TerminalView::new().with_history(show_history));

            if let Err(e) = cli::handlers::handle_command(&mut controller, command, &config).await {
                // Client errors were already rendered by the view
                if e.downcast_ref::<ClientError>().is_none() {
                    eprintln!("❌ {}", e);
                }
                std::process::exit(1);
            }
        }
        None => {
            controller.subscribe(cli::view::TerminalView::new());

            let should_exit = Arc::new(AtomicBool::new(false));
            {
                let should_exit = Arc::clone(&should_exit);
                ctrlc::set_handler(move || {
                    log::info!("🔴 Ctrl+C received. Initiating shutdown...");
                    should_exit.store(true, Ordering::SeqCst);
                    println!("\n🧹 Shutdown complete. Goodbye!");
                    std::process::exit(0);
                })
                .context("failed to set Ctrl+C handler")?;
            }

            cli::menu::run_cli_menu(&mut controller, &config, should_exit).await?;
            log::info!("✅ passforge shutdown complete.");
        }
    }

    Ok(())
}
