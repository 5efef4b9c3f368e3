//! Root board trait
//!
//! Aggregates every peripheral interface bring-up touches. The orchestrator
//! is generic over `Board`, so a firmware target and the host mock are both
//! driven by the same code with compile-time dispatch.

use super::{
    BusInterface, LedInterface, OutputInterface, ReceiverInterface, SensorInterface,
    SerialInterface, StorageInterface, SystemInterface, TimerInterface, UsbInterface,
    WatchdogInterface,
};

/// Root board trait
///
/// Implemented automatically for any type that provides all the peripheral
/// interfaces.
///
/// # Example
///
/// ```ignore
/// pub struct BrainBoard { /* peripheral singletons */ }
///
/// impl LedInterface for BrainBoard { /* ... */ }
/// impl WatchdogInterface for BrainBoard { /* ... */ }
/// // ... one impl per interface
///
/// // BrainBoard: Board now holds
/// ```
pub trait Board:
    TimerInterface
    + LedInterface
    + WatchdogInterface
    + SystemInterface
    + BusInterface
    + StorageInterface
    + UsbInterface
    + SerialInterface
    + ReceiverInterface
    + SensorInterface
    + OutputInterface
{
}

impl<T> Board for T where
    T: TimerInterface
        + LedInterface
        + WatchdogInterface
        + SystemInterface
        + BusInterface
        + StorageInterface
        + UsbInterface
        + SerialInterface
        + ReceiverInterface
        + SensorInterface
        + OutputInterface
{
}
