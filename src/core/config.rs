// src/core/config.rs
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use log::LevelFilter;

use crate::api::session::DEFAULT_SESSION_LIMIT;

// Configuration shared by the service and the client
#[derive(Debug, Clone)]
pub struct Config {
    // Client
    pub server_url: String,
    pub request_timeout: Duration,
    pub storage_file: PathBuf,
    pub export_directory: PathBuf,

    // Password Generation
    pub default_password_length: usize,

    // Web Interface
    pub web_address: String,
    pub web_port: u16,
    pub history_limit: usize,
    pub session_limit: usize,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,

    // Problems found while loading, logged once the logger is up
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Client
            server_url: "http://127.0.0.1:5000".to_string(),
            request_timeout: Duration::from_secs(10),
            storage_file: PathBuf::from("./storage.json"),
            export_directory: PathBuf::from("."),

            // Password Generation
            default_password_length: 16,

            // Web Interface
            web_address: "127.0.0.1".to_string(),
            web_port: 5000,
            history_limit: 10,
            session_limit: DEFAULT_SESSION_LIMIT,

            // Logging
            log_level: LevelFilter::Info,
            log_file: None,

            warnings: Vec::new(),
        }
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> Self {
        let mut config = Self::from_lookup(|key| env::var(key).ok());

        if env::var("STORAGE_FILE").is_err() {
            config.storage_file = crate::utils::default_storage_file();
        }

        config
    }

    /// Build a configuration from any key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let mut warnings = Vec::new();

        // Client
        if let Some(url) = lookup("SERVER_URL") {
            config.server_url = url.trim_end_matches('/').to_string();
        }

        if let Some(secs) = parse_var::<u64, _>(&lookup, &mut warnings, "REQUEST_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(file) = lookup("STORAGE_FILE") {
            config.storage_file = PathBuf::from(file);
        }

        if let Some(dir) = lookup("EXPORT_DIRECTORY") {
            config.export_directory = PathBuf::from(dir);
        }

        // Password Generation
        if let Some(length) = parse_var(&lookup, &mut warnings, "DEFAULT_PASSWORD_LENGTH") {
            config.default_password_length = length;
        }

        // Web Interface
        if let Some(address) = lookup("WEB_ADDRESS") {
            config.web_address = address;
        }

        if let Some(port) = parse_var(&lookup, &mut warnings, "WEB_PORT") {
            config.web_port = port;
        }

        if let Some(limit) = parse_var(&lookup, &mut warnings, "HISTORY_LIMIT") {
            config.history_limit = limit;
        }

        if let Some(limit) = parse_var(&lookup, &mut warnings, "SESSION_LIMIT") {
            config.session_limit = limit;
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                "off" => config.log_level = LevelFilter::Off,
                _ => warnings.push(format!("Unknown log level '{}', using {}", level, config.log_level)),
            }
        }

        if let Some(file) = lookup("LOG_FILE") {
            if !file.trim().is_empty() {
                config.log_file = Some(PathBuf::from(file));
            }
        }

        config.warnings = warnings;
        config
    }

    /// Emit the warnings collected by `load`; call after logging is initialized
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            log::warn!("{}", warning);
        }
    }
}

// Parse a variable, keeping the default (and warning) when it is malformed
fn parse_var<T, F>(lookup: &F, warnings: &mut Vec<String>, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warnings.push(format!("Ignoring invalid value '{}' for {}", raw, key));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config.server_url, "http://127.0.0.1:5000");
        assert_eq!(config.web_port, 5000);
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.default_password_length, 16);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = config_from(&[
            ("SERVER_URL", "http://vault.local:8080/"),
            ("WEB_PORT", "8080"),
            ("HISTORY_LIMIT", "25"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("LOG_LEVEL", "DEBUG"),
            ("LOG_FILE", "/tmp/passforge.log"),
            ("STORAGE_FILE", "/tmp/storage.json"),
        ]);
        assert_eq!(config.server_url, "http://vault.local:8080");
        assert_eq!(config.web_port, 8080);
        assert_eq!(config.history_limit, 25);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/passforge.log")));
        assert_eq!(config.storage_file, PathBuf::from("/tmp/storage.json"));
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let config = config_from(&[("WEB_PORT", "not-a-port"), ("HISTORY_LIMIT", "-1")]);
        assert_eq!(config.web_port, 5000);
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.warnings.len(), 2);
        assert!(config.warnings[0].contains("WEB_PORT"));
    }

    #[test]
    fn unknown_log_level_is_reported() {
        let config = config_from(&[("LOG_LEVEL", "chatty"), ("SESSION_LIMIT", "5")]);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.session_limit, 5);
        assert_eq!(config.warnings, vec!["Unknown log level 'chatty', using INFO".to_string()]);
        assert!(config_from(&[]).warnings.is_empty());
    }
}
