// src/api/types.rs
use serde::{Serialize, Deserialize};
use utoipa::ToSchema;
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{HistoryEntry, PasswordAnalysis};

// Generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GenerationResult {
    /// The generated password
    pub password: String,
    /// Strength score (0-4)
    pub score: u8,
    /// Human-readable offline crack time
    pub crack_time: String,
    /// Estimated entropy in bits
    pub entropy: f64,
    /// Suggestions for a stronger password
    #[serde(default)]
    pub feedback: Vec<String>,
    /// Character breakdown of the generated password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<PasswordAnalysis>,
}

// Strength check
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckRequest {
    /// Password to evaluate
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CheckResult {
    /// Strength label ("Very Weak" to "Strong")
    pub strength: String,
    /// Strength score (0-4)
    pub score: u8,
    /// Score scaled to 0-100 for a progress bar
    pub score_percent: f64,
    /// Human-readable offline crack time
    pub crack_time: String,
    /// Ordered list of suggestions
    pub feedback: Vec<String>,
    pub analysis: PasswordAnalysis,
    /// Estimated entropy in bits
    pub entropy: f64,
    /// Whether the password is among the most common ones
    #[serde(default)]
    pub common_password: bool,
}

// History
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    /// Newest entry first
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AckResponse {
    /// Whether the operation was successful
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

// Deep analysis
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// Password to analyze
    #[serde(default)]
    pub password: String,
    /// Optional username to compare the password against
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StrengthSummary {
    pub score: u8,
    pub strength: String,
    pub crack_time: String,
    pub entropy: f64,
    /// Estimated number of guesses needed
    pub guesses: u64,
    /// zxcvbn warning, if any
    pub warning: Option<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatternsDetected {
    pub sequential: bool,
    pub repeated: bool,
    pub keyboard_pattern: bool,
    pub common_password: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeepAnalysis {
    pub basic_analysis: PasswordAnalysis,
    pub strength: StrengthSummary,
    /// Occurrences of each character
    pub character_distribution: BTreeMap<String, usize>,
    /// 0-100 similarity between username and password
    pub username_similarity: u8,
    pub patterns_detected: PatternsDetected,
}

// Export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExportRequest {
    /// One of "text", "csv" or "json" (default "text")
    #[serde(default)]
    pub format: Option<String>,
    /// Passwords to export; the session history is used when empty
    #[serde(default)]
    pub passwords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExportEntry {
    pub password: String,
    pub generated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExportContent {
    Text(String),
    Entries(Vec<ExportEntry>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExportResponse {
    /// Rendered content: a string for text and csv, a list of entries for json
    #[schema(value_type = Object)]
    pub content: ExportContent,
    pub format: ExportFormat,
}
