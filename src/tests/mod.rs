//! Cross-module test suites.

pub mod common;

mod unit;
