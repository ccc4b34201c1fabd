// src/cli/commands.rs
use clap::{Args, Subcommand};

use crate::client::controller::{FAVORITES_EXPORT_FILENAME, HISTORY_EXPORT_FILENAME};
use crate::models::{GenerationMethod, GenerationRequest};

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Run the password service
    Serve {
        /// Address to bind
        #[arg(long)]
        address: Option<String>,

        /// Port to bind
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Generate a password
    Generate(GenerateArgs),

    /// Check the strength of a password
    Check {
        /// Password to check (prompted when omitted)
        password: Option<String>,
    },

    /// Show this session's password history
    History,

    /// Clear this session's password history
    ClearHistory,

    /// Export this session's history to a text file
    ExportHistory {
        /// File name inside the export directory
        #[arg(long, default_value = HISTORY_EXPORT_FILENAME)]
        file: String,
    },

    /// Manage saved passwords
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum FavoritesCommand {
    /// List saved passwords
    List,

    /// Save a password, or unsave it if it is already saved
    Toggle {
        #[arg(required = true)]
        password: String,
    },

    /// Remove a saved password
    Remove {
        #[arg(required = true)]
        password: String,
    },

    /// Export saved passwords to a text file
    Export {
        /// File name inside the export directory
        #[arg(long, default_value = FAVORITES_EXPORT_FILENAME)]
        file: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Password length (defaults to DEFAULT_PASSWORD_LENGTH)
    #[arg(long, short)]
    pub length: Option<usize>,

    /// Generation method
    #[arg(long, short, value_enum, default_value_t = GenerationMethod::Random)]
    pub method: GenerationMethod,

    /// Token pattern for the pattern method (A adjective, N noun, V verb, C/c letter, D digit, S symbol)
    #[arg(long)]
    pub pattern: Option<String>,

    #[arg(long)]
    pub no_uppercase: bool,

    #[arg(long)]
    pub no_lowercase: bool,

    #[arg(long)]
    pub no_digits: bool,

    #[arg(long)]
    pub no_symbols: bool,

    /// Exclude look-alike characters (il1Lo0O)
    #[arg(long)]
    pub exclude_similar: bool,

    /// Exclude brackets, quotes and punctuation
    #[arg(long)]
    pub exclude_ambiguous: bool,

    /// Add the generated password to saved passwords
    #[arg(long)]
    pub save: bool,

    /// Copy the generated password to the clipboard
    #[arg(long)]
    pub copy: bool,
}

impl GenerateArgs {
    pub fn to_request(&self, default_length: usize) -> GenerationRequest {
        GenerationRequest {
            length: self.length.unwrap_or(default_length),
            uppercase: !self.no_uppercase,
            lowercase: !self.no_lowercase,
            digits: !self.no_digits,
            symbols: !self.no_symbols,
            method: self.method,
            pattern: self.pattern.clone().filter(|_| self.method == GenerationMethod::Pattern),
            exclude_similar: self.exclude_similar,
            exclude_ambiguous: self.exclude_ambiguous,
        }
    }
}
