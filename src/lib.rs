//! StudyKit - Text Processing API
//!
//! Core library providing grammar/spelling correction, extractive
//! summarization, and synonym lookup over a small HTTP API with
//! per-user operation history.

pub mod config;
pub mod core;
pub mod database;
pub mod server;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
