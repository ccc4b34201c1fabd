// src/cli/mod.rs
use std::path::PathBuf;

use clap::Parser;

use crate::core::config::Config;

pub mod commands;
pub mod handlers;
pub mod menu;
pub mod view;

pub use commands::CliCommand;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Password service URL
    #[arg(long, env = "SERVER_URL")]
    pub server_url: Option<String>,

    /// File holding saved passwords and the session id
    #[arg(long, env = "STORAGE_FILE")]
    pub storage: Option<PathBuf>,

    /// Directory exported files are written to
    #[arg(long, env = "EXPORT_DIRECTORY")]
    pub export_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Command to execute (interactive menu when omitted)
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl Args {
    /// Command line flags take precedence over the environment
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.server_url {
            config.server_url = url.trim_end_matches('/').to_string();
        }
        if let Some(storage) = &self.storage {
            config.storage_file = storage.clone();
        }
        if let Some(dir) = &self.export_dir {
            config.export_directory = dir.clone();
        }
        if let Some(secs) = self.timeout {
            config.request_timeout = std::time::Duration::from_secs(secs);
        }
        if let Some(CliCommand::Serve { address, port }) = &self.command {
            if let Some(address) = address {
                config.web_address = address.clone();
            }
            if let Some(port) = port {
                config.web_port = *port;
            }
        }
    }
}
