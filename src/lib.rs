// src/lib.rs
pub mod api;
pub mod cli;
pub mod client;
pub mod core;
pub mod generators;
pub mod logging;
pub mod models;
pub mod strength;
pub mod utils;
