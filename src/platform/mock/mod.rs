//! Mock platform implementation for testing
//!
//! In-memory implementations of the platform traits for host tests.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled

#![cfg(any(test, feature = "mock"))]

mod board;
mod flash;

pub use board::{Event, Fail, MockBoard};
pub use flash::MockFlash;
