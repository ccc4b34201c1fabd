// src/models.rs
use serde::{de, Deserializer, Serialize, Deserialize};
use utoipa::ToSchema;
use std::fmt;

/// Strategy used by the generator to build a password
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMethod {
    #[default]
    Random,
    Memorable,
    Pattern,
    Xkcd,
    Pin,
}

impl GenerationMethod {
    pub const ALL: [GenerationMethod; 5] = [
        GenerationMethod::Random,
        GenerationMethod::Memorable,
        GenerationMethod::Pattern,
        GenerationMethod::Xkcd,
        GenerationMethod::Pin,
    ];
}

impl fmt::Display for GenerationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMethod::Random => write!(f, "random"),
            GenerationMethod::Memorable => write!(f, "memorable"),
            GenerationMethod::Pattern => write!(f, "pattern"),
            GenerationMethod::Xkcd => write!(f, "xkcd"),
            GenerationMethod::Pin => write!(f, "pin"),
        }
    }
}

// Password generation options, as sent on the wire to POST /generate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct GenerationRequest {
    /// Requested password length (the service clamps it to 6..=128)
    #[serde(deserialize_with = "saturating_length")]
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
    pub method: GenerationMethod,
    /// Token pattern, only used by the `pattern` method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Drop look-alike characters (il1Lo0O)
    pub exclude_similar: bool,
    /// Drop brackets, quotes and punctuation from the symbol set
    pub exclude_ambiguous: bool,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
            method: GenerationMethod::Random,
            pattern: None,
            exclude_similar: false,
            exclude_ambiguous: false,
        }
    }
}

impl GenerationRequest {
    pub fn has_character_class(&self) -> bool {
        self.uppercase || self.lowercase || self.digits || self.symbols
    }

    /// Falls back to lowercase when no character class is selected
    pub fn normalized(mut self) -> Self {
        if !self.has_character_class() {
            self.lowercase = true;
        }
        self
    }
}

// Any JSON number is accepted: negatives become 0 and huge values saturate,
// leaving the range check to the generator's clamp
fn saturating_length<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    struct LengthVisitor;

    impl<'de> de::Visitor<'de> for LengthVisitor {
        type Value = usize;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "a password length")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<usize, E> {
            Ok(usize::try_from(value).unwrap_or(usize::MAX))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<usize, E> {
            Ok(usize::try_from(value.max(0)).unwrap_or(usize::MAX))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<usize, E> {
            if value.is_nan() {
                return Err(E::invalid_value(de::Unexpected::Float(value), &self));
            }
            // Float to int casts saturate
            Ok(value.trunc() as usize)
        }
    }

    deserializer.deserialize_any(LengthVisitor)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CharacterSets {
    pub uppercase: usize,
    pub lowercase: usize,
    pub digits: usize,
    pub symbols: usize,
}

impl CharacterSets {
    /// Number of character classes present at least once
    pub fn classes_used(&self) -> usize {
        [self.uppercase, self.lowercase, self.digits, self.symbols]
            .iter()
            .filter(|count| **count > 0)
            .count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PasswordAnalysis {
    pub length: usize,
    pub character_sets: CharacterSets,
    #[serde(default)]
    pub repeating_chars: usize,
    #[serde(default)]
    pub sequential_chars: usize,
    #[serde(default)]
    pub keyboard_patterns: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    pub password: String,
    pub score: u8,
    pub crack_time: String,
    #[serde(default)]
    pub timestamp: String,
}
