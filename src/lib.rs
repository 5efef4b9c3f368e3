#![cfg_attr(not(test), no_std)]

//! brain_board - Board bring-up and port configuration for the Brain flight controller
//!
//! Takes the board from reset to a wired peripheral set: initializes drivers
//! in dependency order, binds communication purposes to physical ports from
//! the persisted hardware configuration, brings up the sensors and checks the
//! telemetry invariant. Unrecoverable failures end in a coded LED blink loop.
//!
//! Decisions that need no hardware live in `brain_board_core`; this crate
//! sequences them against the platform traits.

#[cfg(all(feature = "mock", not(test)))]
extern crate std;

// Logging macros and shared infrastructure
pub mod core;

// Platform abstraction layer
pub mod platform;

// Bring-up orchestration
pub mod board;
