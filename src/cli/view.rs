// src/cli/view.rs
use console::{style, Style};

use crate::api::types::{CheckResult, GenerationResult};
use crate::client::{ControllerEvent, ControllerObserver};
use crate::models::{HistoryEntry, PasswordAnalysis};
use crate::strength::strength_label;

const METER_WIDTH: usize = 20;

/// Renders controller events to the terminal
#[derive(Debug, Clone)]
pub struct TerminalView {
    show_history: bool,
}

impl Default for TerminalView {
    fn default() -> Self {
        Self { show_history: true }
    }
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether history refreshes are printed in full
    pub fn with_history(mut self, show_history: bool) -> Self {
        self.show_history = show_history;
        self
    }
}

impl ControllerObserver for TerminalView {
    fn notify(&mut self, event: &ControllerEvent) {
        match event {
            ControllerEvent::PasswordGenerated(result) => print_generation(result),
            ControllerEvent::PasswordChecked(result) => print_check(result),
            ControllerEvent::DisplayChanged { text, hidden } => {
                let suffix = if *hidden { " (hidden)" } else { "" };
                println!("🔑 Password: {}{}", style(text).bold(), style(suffix).dim());
            }
            ControllerEvent::HistoryUpdated(history) => {
                if self.show_history {
                    print_history(history);
                }
            }
            ControllerEvent::HistoryCleared { server_acknowledged } => {
                if *server_acknowledged {
                    println!("🧹 Password history cleared!");
                } else {
                    println!("🧹 {}", style("History cleared locally").yellow());
                }
            }
            ControllerEvent::FavoritesChanged(passwords) => print_favorites(passwords),
            ControllerEvent::Copied => println!("📋 Password copied to clipboard!"),
            ControllerEvent::Exported { path, count } => {
                println!("📤 Exported {} password(s) to {}", count, path.display());
            }
            ControllerEvent::Warning(message) => println!("⚠️ {}", style(message).yellow()),
            ControllerEvent::Error(message) => eprintln!("❌ {}", style(message).red()),
        }
    }
}

fn score_style(score: u8) -> Style {
    match score {
        0 | 1 => Style::new().red(),
        2 => Style::new().yellow(),
        3 => Style::new().cyan(),
        _ => Style::new().green(),
    }
}

/// Filled bar scaled to score/4
pub fn strength_meter(score: u8) -> String {
    let filled = (usize::from(score.min(4)) * METER_WIDTH) / 4;
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(METER_WIDTH - filled));
    format!(
        "{} {}",
        score_style(score).apply_to(bar),
        score_style(score).apply_to(strength_label(score))
    )
}

fn print_generation(result: &GenerationResult) {
    println!();
    println!("{}", style("Generated password").bold().underlined());
    println!("Strength:   {}", strength_meter(result.score));
    println!("Crack time: {}", result.crack_time);
    println!("Entropy:    {:.1} bits", result.entropy);
    if let Some(analysis) = &result.analysis {
        print_analysis(analysis);
    }
    print_feedback(&result.feedback);
}

fn print_check(result: &CheckResult) {
    println!();
    println!("{}", style("Password strength").bold().underlined());
    println!("Strength:   {} ({:.0}%)", strength_meter(result.score), result.score_percent);
    println!("Crack time: {}", result.crack_time);
    println!("Entropy:    {:.1} bits", result.entropy);
    if result.common_password {
        println!("{}", style("This password is among the most common ones").red().bold());
    }
    print_analysis(&result.analysis);
    print_feedback(&result.feedback);
}

fn print_analysis(analysis: &PasswordAnalysis) {
    let sets = &analysis.character_sets;
    println!(
        "Length {} | {} uppercase, {} lowercase, {} digits, {} symbols ({}/4 classes)",
        analysis.length,
        sets.uppercase,
        sets.lowercase,
        sets.digits,
        sets.symbols,
        sets.classes_used()
    );

    let mut patterns = Vec::new();
    if analysis.repeating_chars > 0 {
        patterns.push(format!("{} repeated run(s)", analysis.repeating_chars));
    }
    if analysis.sequential_chars > 0 {
        patterns.push(format!("{} sequence(s)", analysis.sequential_chars));
    }
    if analysis.keyboard_patterns > 0 {
        patterns.push(format!("{} keyboard pattern(s)", analysis.keyboard_patterns));
    }
    if !patterns.is_empty() {
        println!("Patterns: {}", style(patterns.join(", ")).yellow());
    }
}

fn print_feedback(feedback: &[String]) {
    if feedback.is_empty() {
        return;
    }
    println!("Suggestions:");
    for item in feedback {
        println!("  • {}", item);
    }
}

pub fn print_history(history: &[HistoryEntry]) {
    if history.is_empty() {
        println!("🕘 No passwords generated yet");
        return;
    }

    println!("🕘 Recent passwords:");
    for (index, entry) in history.iter().enumerate() {
        println!(
            "  {:>2}. {}  {}  {}  {}",
            index + 1,
            style(&entry.password).bold(),
            score_style(entry.score).apply_to(strength_label(entry.score)),
            entry.crack_time,
            style(&entry.timestamp).dim()
        );
    }
}

fn print_favorites(passwords: &[String]) {
    if passwords.is_empty() {
        println!("⭐ No saved passwords yet");
        return;
    }

    println!("⭐ Saved passwords ({}):", passwords.len());
    for password in passwords {
        println!("  • {}", password);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_fills_with_score() {
        console::set_colors_enabled(false);
        assert!(strength_meter(0).starts_with(&"░".repeat(METER_WIDTH)));
        assert!(strength_meter(4).starts_with(&"█".repeat(METER_WIDTH)));
        assert!(strength_meter(2).contains("Fair"));
    }
}
