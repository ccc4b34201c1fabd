// src/generators/password.rs
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use super::wordlist::{self, ADJECTIVES, COMMON_WORDS, NOUNS, VERBS};
use crate::models::{GenerationMethod, GenerationRequest};

pub const MIN_LENGTH: usize = 6;
pub const MAX_LENGTH: usize = 128;

/// Adjective, verb, adjective, noun, digit, verb, digit
pub const DEFAULT_PATTERN: &str = "AvAnDvD";
const MAX_PATTERN_LENGTH: usize = 256;

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_-+=<>?";
const SIMILAR: &str = "il1Lo0O";
const AMBIGUOUS: &str = "{}[]()/'\"\\`~,;:.<>";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Pattern is too long: {length} characters (max {max})")]
    PatternTooLong { length: usize, max: usize },
}

/// Character classes after exclusions have been applied
#[derive(Debug, Clone)]
pub struct CharacterPools {
    pub uppercase: Vec<char>,
    pub lowercase: Vec<char>,
    pub digits: Vec<char>,
    pub symbols: Vec<char>,
}

impl CharacterPools {
    pub fn for_request(request: &GenerationRequest) -> Self {
        let without_similar = |set: &str| -> Vec<char> {
            set.chars()
                .filter(|c| !request.exclude_similar || !SIMILAR.contains(*c))
                .collect()
        };

        Self {
            uppercase: without_similar(UPPERCASE),
            lowercase: without_similar(LOWERCASE),
            digits: without_similar(DIGITS),
            symbols: SYMBOLS
                .chars()
                .filter(|c| !request.exclude_ambiguous || !AMBIGUOUS.contains(*c))
                .collect(),
        }
    }

    /// Union of the selected classes, or lowercase when nothing is selected
    pub fn combined(&self, request: &GenerationRequest) -> Vec<char> {
        let mut chars = Vec::new();
        if request.uppercase {
            chars.extend(&self.uppercase);
        }
        if request.lowercase {
            chars.extend(&self.lowercase);
        }
        if request.digits {
            chars.extend(&self.digits);
        }
        if request.symbols {
            chars.extend(&self.symbols);
        }

        if chars.is_empty() {
            chars.extend(&self.lowercase);
        }
        chars
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PasswordGenerator;

impl PasswordGenerator {
    pub fn new() -> Self {
        PasswordGenerator
    }

    pub fn clamp_length(length: usize) -> usize {
        length.clamp(MIN_LENGTH, MAX_LENGTH)
    }

    pub fn generate_password(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
        self.generate_with_rng(request, &mut rand::thread_rng())
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> Result<String, GeneratorError> {
        let length = Self::clamp_length(request.length);
        let pools = CharacterPools::for_request(request);
        let combined = pools.combined(request);

        let password = match request.method {
            GenerationMethod::Random => random_password(request, &pools, &combined, length, rng),
            GenerationMethod::Memorable => memorable_password(request, &pools, &combined, length, rng),
            GenerationMethod::Pattern => pattern_password(request, &pools, &combined, length, rng)?,
            GenerationMethod::Xkcd => xkcd_password(request, &pools, length, rng),
            GenerationMethod::Pin => {
                let pool = if request.digits { &pools.digits } else { &pools.lowercase };
                (0..length).map(|_| pick(pool, rng)).collect()
            }
        };

        Ok(password)
    }
}

fn random_password<R: Rng + ?Sized>(
    request: &GenerationRequest,
    pools: &CharacterPools,
    combined: &[char],
    length: usize,
    rng: &mut R,
) -> String {
    let mut chars: Vec<char> = (0..length).map(|_| pick(combined, rng)).collect();

    // One character from each selected class, each at its own position
    if length >= 4 {
        let required: Vec<char> = [
            (request.uppercase, &pools.uppercase),
            (request.lowercase, &pools.lowercase),
            (request.digits, &pools.digits),
            (request.symbols, &pools.symbols),
        ]
        .iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, pool)| pick(pool, rng))
        .collect();

        let positions = rand::seq::index::sample(rng, length, required.len());
        for (position, c) in positions.into_iter().zip(required) {
            chars[position] = c;
        }
    }

    chars.into_iter().collect()
}

fn memorable_password<R: Rng + ?Sized>(
    request: &GenerationRequest,
    pools: &CharacterPools,
    combined: &[char],
    length: usize,
    rng: &mut R,
) -> String {
    let word_count = (length / 6).max(2).min(COMMON_WORDS.len());

    let mut parts: Vec<String> = COMMON_WORDS
        .choose_multiple(rng, word_count)
        .map(|word| styled(word, request.uppercase))
        .collect();

    if request.digits {
        parts.push(rng.gen_range(10..=999u32).to_string());
    }
    if request.symbols {
        parts.push([pick(&pools.symbols, rng), pick(&pools.symbols, rng)].iter().collect());
    }

    fit_to_length(parts.concat(), length, combined, rng)
}

fn pattern_password<R: Rng + ?Sized>(
    request: &GenerationRequest,
    pools: &CharacterPools,
    combined: &[char],
    length: usize,
    rng: &mut R,
) -> Result<String, GeneratorError> {
    let pattern = request
        .pattern
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_PATTERN);

    let pattern_length = pattern.chars().count();
    if pattern_length > MAX_PATTERN_LENGTH {
        return Err(GeneratorError::PatternTooLong {
            length: pattern_length,
            max: MAX_PATTERN_LENGTH,
        });
    }

    let mut password = String::new();
    for token in pattern.chars() {
        match token {
            'A' => password.push_str(&pick_word(ADJECTIVES, request.uppercase, rng)),
            'N' => password.push_str(&pick_word(NOUNS, request.uppercase, rng)),
            'V' => password.push_str(&pick_word(VERBS, request.uppercase, rng)),
            'C' => {
                let pool = if request.uppercase { &pools.uppercase } else { &pools.lowercase };
                password.push(pick(pool, rng));
            }
            'c' => password.push(pick(&pools.lowercase, rng)),
            'D' => {
                let pool = if request.digits { &pools.digits } else { &pools.lowercase };
                password.push(pick(pool, rng));
            }
            'S' => {
                let pool = if request.symbols { &pools.symbols } else { &pools.lowercase };
                password.push(pick(pool, rng));
            }
            literal => password.push(literal),
        }
    }

    Ok(fit_to_length(password, length, combined, rng))
}

fn xkcd_password<R: Rng + ?Sized>(
    request: &GenerationRequest,
    pools: &CharacterPools,
    length: usize,
    rng: &mut R,
) -> String {
    let separator = if request.symbols {
        pick(&pools.symbols, rng).to_string()
    } else {
        "-".to_string()
    };

    let pool = wordlist::xkcd_pool();
    let mut words: Vec<String> = pool
        .choose_multiple(rng, 4)
        .map(|word| styled(word, request.uppercase))
        .collect();

    if request.digits {
        if let Some(last) = words.last_mut() {
            last.push_str(&rng.gen_range(10..=99u32).to_string());
        }
    }

    // Never padded, only truncated
    words.join(&separator).chars().take(length).collect()
}

// Pools are never empty: exclusions leave every class populated and the
// combined pool falls back to lowercase.
fn pick<R: Rng + ?Sized>(pool: &[char], rng: &mut R) -> char {
    pool[rng.gen_range(0..pool.len())]
}

fn pick_word<R: Rng + ?Sized>(words: &[&str], capitalize: bool, rng: &mut R) -> String {
    styled(words[rng.gen_range(0..words.len())], capitalize)
}

fn styled(word: &str, capitalize: bool) -> String {
    if !capitalize {
        return word.to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn fit_to_length<R: Rng + ?Sized>(password: String, length: usize, pool: &[char], rng: &mut R) -> String {
    let mut chars: Vec<char> = password.chars().collect();
    chars.truncate(length);
    while chars.len() < length {
        chars.push(pick(pool, rng));
    }
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request(method: GenerationMethod) -> GenerationRequest {
        GenerationRequest {
            method,
            ..Default::default()
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn random_password_contains_every_selected_class() {
        let generator = PasswordGenerator::new();
        let mut rng = rng();
        for _ in 0..50 {
            let password = generator
                .generate_with_rng(&request(GenerationMethod::Random), &mut rng)
                .unwrap();
            assert_eq!(password.chars().count(), 16);
            assert!(password.chars().any(|c| c.is_ascii_uppercase()));
            assert!(password.chars().any(|c| c.is_ascii_lowercase()));
            assert!(password.chars().any(|c| c.is_ascii_digit()));
            assert!(password.chars().any(|c| SYMBOLS.contains(c)));
        }
    }

    #[test]
    fn length_is_clamped() {
        let generator = PasswordGenerator::new();
        let mut rng = rng();

        let short = GenerationRequest { length: 2, ..Default::default() };
        assert_eq!(generator.generate_with_rng(&short, &mut rng).unwrap().len(), MIN_LENGTH);

        let long = GenerationRequest { length: 500, ..Default::default() };
        assert_eq!(generator.generate_with_rng(&long, &mut rng).unwrap().len(), MAX_LENGTH);
    }

    #[test]
    fn exclude_similar_removes_lookalikes() {
        let generator = PasswordGenerator::new();
        let mut rng = rng();
        let req = GenerationRequest {
            length: 128,
            exclude_similar: true,
            ..Default::default()
        };
        for _ in 0..20 {
            let password = generator.generate_with_rng(&req, &mut rng).unwrap();
            assert!(!password.chars().any(|c| SIMILAR.contains(c)), "{password}");
        }
    }

    #[test]
    fn exclude_ambiguous_keeps_only_safe_symbols() {
        let generator = PasswordGenerator::new();
        let mut rng = rng();
        let req = GenerationRequest {
            length: 64,
            uppercase: false,
            lowercase: false,
            digits: false,
            symbols: true,
            exclude_ambiguous: true,
            ..Default::default()
        };
        let password = generator.generate_with_rng(&req, &mut rng).unwrap();
        assert!(password.chars().all(|c| "!@#$%^&*_-+=?".contains(c)), "{password}");
    }

    #[test]
    fn no_class_selected_falls_back_to_lowercase() {
        let generator = PasswordGenerator::new();
        let req = GenerationRequest {
            uppercase: false,
            lowercase: false,
            digits: false,
            symbols: false,
            ..Default::default()
        };
        let password = generator.generate_with_rng(&req, &mut rng()).unwrap();
        assert_eq!(password.len(), 16);
        assert!(password.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn pin_uses_digits_or_lowercase() {
        let generator = PasswordGenerator::new();
        let mut rng = rng();

        let pin = GenerationRequest { length: 8, ..request(GenerationMethod::Pin) };
        let password = generator.generate_with_rng(&pin, &mut rng).unwrap();
        assert_eq!(password.len(), 8);
        assert!(password.chars().all(|c| c.is_ascii_digit()));

        let letters = GenerationRequest { digits: false, ..pin };
        let password = generator.generate_with_rng(&letters, &mut rng).unwrap();
        assert!(password.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn pattern_tokens_and_literals() {
        let generator = PasswordGenerator::new();
        let req = GenerationRequest {
            length: 10,
            pattern: Some("DDDD-x".to_string()),
            ..request(GenerationMethod::Pattern)
        };
        let password = generator.generate_with_rng(&req, &mut rng()).unwrap();
        assert_eq!(password.chars().count(), 10);
        assert!(password[..4].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(&password[4..6], "-x");
    }

    #[test]
    fn default_pattern_starts_with_capitalized_adjective() {
        let generator = PasswordGenerator::new();
        let req = GenerationRequest { length: 128, ..request(GenerationMethod::Pattern) };
        let password = generator.generate_with_rng(&req, &mut rng()).unwrap();
        assert!(ADJECTIVES
            .iter()
            .any(|adjective| password.starts_with(&styled(adjective, true))));
    }

    #[test]
    fn overlong_pattern_is_rejected() {
        let generator = PasswordGenerator::new();
        let req = GenerationRequest {
            pattern: Some("A".repeat(MAX_PATTERN_LENGTH + 1)),
            ..request(GenerationMethod::Pattern)
        };
        assert_eq!(
            generator.generate_with_rng(&req, &mut rng()),
            Err(GeneratorError::PatternTooLong { length: MAX_PATTERN_LENGTH + 1, max: MAX_PATTERN_LENGTH })
        );
    }

    #[test]
    fn memorable_password_has_requested_length() {
        let generator = PasswordGenerator::new();
        let mut rng = rng();
        for length in [6, 12, 30, 128] {
            let req = GenerationRequest { length, ..request(GenerationMethod::Memorable) };
            assert_eq!(generator.generate_with_rng(&req, &mut rng).unwrap().chars().count(), length);
        }
    }

    #[test]
    fn xkcd_joins_four_words() {
        let generator = PasswordGenerator::new();
        let req = GenerationRequest {
            length: 128,
            symbols: false,
            ..request(GenerationMethod::Xkcd)
        };
        let password = generator.generate_with_rng(&req, &mut rng()).unwrap();
        assert_eq!(password.matches('-').count(), 3);
        assert!(password.chars().last().is_some_and(|c| c.is_ascii_digit()));
    }
}
