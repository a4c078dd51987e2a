//! Unit test suites for the grammar pipeline.
