// src/generators/wordlist.rs

pub const COMMON_WORDS: &[&str] = &[
    "apple", "orange", "banana", "grape", "melon", "cherry", "lemon",
    "kiwi", "peach", "plum", "mango", "berry", "pear", "lime", "fig",
];

pub const ADJECTIVES: &[&str] = &[
    "happy", "brave", "calm", "wise", "kind", "quick", "bold", "bright",
    "clever", "fierce", "gentle", "grand", "lively", "noble", "proud",
];

pub const NOUNS: &[&str] = &[
    "tiger", "river", "mountain", "ocean", "forest", "eagle", "castle",
    "garden", "island", "journey", "legend", "meteor", "planet", "shadow", "thunder",
];

pub const VERBS: &[&str] = &[
    "runs", "jumps", "flies", "builds", "creates", "dreams", "explores",
    "fights", "grows", "holds", "leads", "moves", "seeks", "shines", "wins",
];

/// Pool for the xkcd method: fruit, adjectives and nouns together
pub fn xkcd_pool() -> Vec<&'static str> {
    COMMON_WORDS
        .iter()
        .chain(ADJECTIVES)
        .chain(NOUNS)
        .copied()
        .collect()
}
