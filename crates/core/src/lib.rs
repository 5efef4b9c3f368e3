//! brain_board_core - Pure no_std tables and types for Brain board bring-up
//!
//! This crate contains the platform-agnostic half of the board bring-up:
//! everything that can be decided from the persisted hardware configuration
//! without touching a peripheral. It is tested on host without any feature
//! flags.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Data over branches**: Port roles and functions resolve through tables
//!
//! # Modules
//!
//! - [`parameters`]: Parameter store and the hardware/module/OSD settings groups
//! - [`ports`]: Port roles, port functions, per-role tables, channels, receiver groups
//! - [`sensors`]: Sensor selections, range/orientation translation, bring-up results
//! - [`capabilities`]: Compiled-in driver capability flags
//! - [`fault`]: Fault codes and the blink pattern
//! - [`boot_count`]: Boot attempt counter policy and persisted record
//! - [`alarms`]: Alarm severities raised during bring-up
//! - [`handle`]: Opaque driver handles

#![no_std]

pub mod alarms;
pub mod boot_count;
pub mod capabilities;
pub mod crc;
pub mod fault;
pub mod handle;
pub mod parameters;
pub mod ports;
pub mod sensors;

pub use capabilities::Capabilities;
pub use fault::FaultCode;
