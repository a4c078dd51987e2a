//! Common Test Utilities
//!
//! Shared fixtures used across test modules: temp databases, spell
//! dictionaries, and scripted rewriter backends.


pub use fixtures::*;
