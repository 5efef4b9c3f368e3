//! Platform abstraction layer
//!
//! Driver entry points used during bring-up. Everything that touches a
//! peripheral goes through the traits here; board-level code never names a
//! register.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{
    Board, BootCounter, BusInterface, FlashInterface, LedInterface, OutputInterface,
    ReceiverInterface, SensorInterface, SerialInterface, StorageInterface, SystemInterface,
    TimerInterface, UsbInterface, WatchdogInterface,
};
