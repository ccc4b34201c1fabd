// src/api/handlers/mod.rs
pub mod generator;
pub mod check;
pub mod history;
pub mod analyze;
pub mod export;
