//! Integration test utilities for the skillswap backend
//!
//! This crate provides helpers for running end-to-end tests against the
//! REST API (the realtime hub shares the same process).

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
