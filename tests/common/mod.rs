//! Common test utilities for WatchSync CLI tests.
//!
//! This module provides:
//! - `TestEnv`: an isolated watched root plus private config locations
//! - `TestResult`: captured output of one CLI run

pub mod env;

pub use env::*;
