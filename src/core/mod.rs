//! Core text-processing services.

pub mod grammar;
pub mod logging;
pub mod summarize;
pub mod synonyms;
pub mod text;
