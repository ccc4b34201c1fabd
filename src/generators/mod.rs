// src/generators/mod.rs
mod password;
pub mod wordlist;

pub use password::{
    CharacterPools, GeneratorError, PasswordGenerator, DEFAULT_PATTERN, MAX_LENGTH, MIN_LENGTH,
};
