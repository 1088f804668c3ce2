//! Crate-internal test suites
//!
//! - `analyzer_tests`: end-to-end analysis over the fixture card pool
//! - `common`: shared card and deck fixtures
//! - `property`: proptest invariants over the deck engine

mod analyzer_tests;
mod common;
mod property;
