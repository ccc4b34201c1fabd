// src/strength/mod.rs
//
// Strength scoring on top of zxcvbn plus a few cheap pattern checks that feed
// the suggestion list.
use std::collections::BTreeMap;
use std::collections::HashSet;

use zxcvbn::{zxcvbn, Score};

use crate::models::{CharacterSets, PasswordAnalysis};

pub const STRENGTH_LABELS: [&str; 5] = ["Very Weak", "Weak", "Fair", "Good", "Strong"];

/// Below this many guesses a password counts as common
pub const COMMON_PASSWORD_GUESSES: u64 = 1000;
pub const COMMON_PASSWORD_SUGGESTION: &str = "This is a commonly used password or pattern";

const SEQUENCES: [&str; 3] = [
    "abcdefghijklmnopqrstuvwxyz",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "0123456789",
];

const KEYBOARD_PATTERNS: [&str; 5] = ["qwerty", "asdfgh", "zxcvbn", "123456", "qazwsx"];

#[derive(Debug, Clone, PartialEq)]
pub struct StrengthEstimate {
    /// zxcvbn score, 0 (very weak) to 4 (very strong)
    pub score: u8,
    /// Offline slow-hash crack time (1e4 guesses per second)
    pub crack_time: String,
    pub guesses: u64,
    /// log2 of the estimated guess count
    pub entropy: f64,
    pub warning: Option<String>,
    pub suggestions: Vec<String>,
}

impl StrengthEstimate {
    pub fn is_common(&self) -> bool {
        self.guesses < COMMON_PASSWORD_GUESSES
    }

    pub fn label(&self) -> &'static str {
        strength_label(self.score)
    }

    pub fn score_percent(&self) -> f64 {
        score_percent(self.score)
    }
}

pub fn estimate(password: &str) -> StrengthEstimate {
    let result = zxcvbn(password, &[]);

    let (warning, suggestions) = match result.feedback() {
        Some(feedback) => (
            feedback.warning().map(|w| w.to_string()),
            feedback.suggestions().iter().map(|s| s.to_string()).collect(),
        ),
        None => (None, Vec::new()),
    };

    StrengthEstimate {
        score: score_value(result.score()),
        crack_time: result
            .crack_times()
            .offline_slow_hashing_1e4_per_second()
            .to_string(),
        guesses: result.guesses(),
        entropy: result.guesses_log10() * std::f64::consts::LOG2_10,
        warning,
        suggestions,
    }
}

fn score_value(score: Score) -> u8 {
    #[allow(unreachable_patterns)]
    match score {
        Score::Zero => 0,
        Score::One => 1,
        Score::Two => 2,
        Score::Three => 3,
        Score::Four => 4,
        _ => 0,
    }
}

pub fn strength_label(score: u8) -> &'static str {
    STRENGTH_LABELS[usize::from(score.min(4))]
}

pub fn score_percent(score: u8) -> f64 {
    f64::from(score.min(4)) / 4.0 * 100.0
}

pub fn analyze_patterns(password: &str) -> PasswordAnalysis {
    let mut character_sets = CharacterSets::default();
    for c in password.chars() {
        if c.is_ascii_uppercase() {
            character_sets.uppercase += 1;
        } else if c.is_ascii_lowercase() {
            character_sets.lowercase += 1;
        } else if c.is_ascii_digit() {
            character_sets.digits += 1;
        } else {
            character_sets.symbols += 1;
        }
    }

    let sequential_chars = SEQUENCES
        .iter()
        .flat_map(|sequence| sequence.as_bytes().windows(3))
        .filter(|window| {
            std::str::from_utf8(window).is_ok_and(|trigram| password.contains(trigram))
        })
        .count();

    let lowered = password.to_lowercase();
    let keyboard_patterns = KEYBOARD_PATTERNS
        .iter()
        .filter(|pattern| lowered.contains(*pattern))
        .count();

    PasswordAnalysis {
        length: password.chars().count(),
        character_sets,
        repeating_chars: count_repeated_runs(password),
        sequential_chars,
        keyboard_patterns,
    }
}

// Runs of three or more identical characters, each run counted once
fn count_repeated_runs(password: &str) -> usize {
    let mut runs = 0;
    let mut previous: Option<char> = None;
    let mut run_length = 0;

    for c in password.chars() {
        if Some(c) == previous {
            run_length += 1;
            if run_length == 3 {
                runs += 1;
            }
        } else {
            previous = Some(c);
            run_length = 1;
        }
    }
    runs
}

/// zxcvbn suggestions followed by rule-based hints, first occurrence wins
pub fn suggestions(analysis: &PasswordAnalysis, estimate: &StrengthEstimate) -> Vec<String> {
    let mut hints: Vec<String> = estimate.suggestions.clone();

    if analysis.length < 12 {
        hints.push("Consider using a longer password (at least 12 characters)".to_string());
    }
    if analysis.character_sets.uppercase == 0 {
        hints.push("Add uppercase letters to increase complexity".to_string());
    }
    if analysis.character_sets.lowercase == 0 {
        hints.push("Add lowercase letters to increase complexity".to_string());
    }
    if analysis.character_sets.digits == 0 {
        hints.push("Add digits to increase complexity".to_string());
    }
    if analysis.character_sets.symbols == 0 {
        hints.push("Add symbols to increase complexity".to_string());
    }
    if analysis.repeating_chars > 0 {
        hints.push("Avoid repeating characters (like 'aaa')".to_string());
    }
    if analysis.sequential_chars > 0 {
        hints.push("Avoid sequential characters (like '123' or 'abc')".to_string());
    }
    if analysis.keyboard_patterns > 0 {
        hints.push("Avoid keyboard patterns (like 'qwerty')".to_string());
    }

    let mut seen = HashSet::new();
    hints.retain(|hint| seen.insert(hint.clone()));
    hints
}

pub fn character_distribution(password: &str) -> BTreeMap<String, usize> {
    let mut distribution = BTreeMap::new();
    for c in password.chars() {
        *distribution.entry(c.to_string()).or_insert(0) += 1;
    }
    distribution
}

/// 100 when the username appears in the password, otherwise the share of
/// distinct username characters that also occur in the password
pub fn username_similarity(username: &str, password: &str) -> u8 {
    if username.is_empty() {
        return 0;
    }

    let username_len = username.chars().count();
    let username = username.to_lowercase();
    let password = password.to_lowercase();
    if password.contains(&username) {
        return 100;
    }

    let username_chars: HashSet<char> = username.chars().collect();
    let password_chars: HashSet<char> = password.chars().collect();
    let common = username_chars.intersection(&password_chars).count();

    let percent = common * 100 / username_len;
    percent.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_percentages_follow_score() {
        assert_eq!(strength_label(0), "Very Weak");
        assert_eq!(strength_label(4), "Strong");
        assert_eq!(strength_label(9), "Strong");
        assert_eq!(score_percent(2), 50.0);
        assert_eq!(score_percent(4), 100.0);
    }

    #[test]
    fn common_password_scores_low() {
        let estimate = estimate("password");
        assert!(estimate.score <= 1);
        assert!(estimate.is_common());
        assert!(estimate.entropy >= 0.0);
    }

    #[test]
    fn long_random_password_scores_high() {
        let estimate = estimate("x9#Qv!2mLr$7TzWp@4kN");
        assert_eq!(estimate.score, 4);
        assert!(!estimate.is_common());
        assert!(estimate.entropy > 40.0);
        assert!(!estimate.crack_time.is_empty());
    }

    #[test]
    fn analysis_counts_classes_and_patterns() {
        let analysis = analyze_patterns("aaaBC12qwerty!");
        assert_eq!(analysis.length, 14);
        assert_eq!(analysis.character_sets.uppercase, 2);
        assert_eq!(analysis.character_sets.lowercase, 9);
        assert_eq!(analysis.character_sets.digits, 2);
        assert_eq!(analysis.character_sets.symbols, 1);
        assert_eq!(analysis.repeating_chars, 1);
        assert_eq!(analysis.keyboard_patterns, 1);
        assert_eq!(analysis.sequential_chars, 0);
    }

    #[test]
    fn sequences_are_counted_per_trigram() {
        assert_eq!(analyze_patterns("abcd").sequential_chars, 2);
        assert_eq!(analyze_patterns("x123y").sequential_chars, 1);
    }

    #[test]
    fn long_runs_count_once() {
        assert_eq!(count_repeated_runs("aaaaaa"), 1);
        assert_eq!(count_repeated_runs("aaabbbcc"), 2);
        assert_eq!(count_repeated_runs("aabb"), 0);
    }

    #[test]
    fn suggestions_are_deduplicated() {
        let analysis = analyze_patterns("abc");
        let mut estimate = estimate("abc");
        estimate.suggestions = vec![
            "Add digits to increase complexity".to_string(),
            "Add digits to increase complexity".to_string(),
        ];
        let hints = suggestions(&analysis, &estimate);
        assert_eq!(hints.iter().filter(|h| h.starts_with("Add digits")).count(), 1);
        assert_eq!(hints[0], "Add digits to increase complexity");
        assert!(hints.iter().any(|h| h.starts_with("Consider using a longer password")));
        assert!(hints.iter().any(|h| h.starts_with("Avoid sequential")));
    }

    #[test]
    fn username_similarity_rules() {
        assert_eq!(username_similarity("", "anything"), 0);
        assert_eq!(username_similarity("Alice", "xxaliceyy"), 100);
        assert_eq!(username_similarity("abcd", "ab"), 50);
    }

    #[test]
    fn username_similarity_uses_original_length() {
        // "İ" lowercases to two chars; the divisor stays at the original count
        assert_eq!("İb".to_lowercase().chars().count(), 3);
        assert_eq!(username_similarity("İb", "b"), 50);
    }

    #[test]
    fn distribution_counts_each_character() {
        let distribution = character_distribution("aab");
        assert_eq!(distribution.get("a"), Some(&2));
        assert_eq!(distribution.get("b"), Some(&1));
    }
}
