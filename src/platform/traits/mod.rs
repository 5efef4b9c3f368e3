//! Platform abstraction traits
//!
//! This module defines the driver entry points a board implementation must
//! provide for bring-up.

pub mod board;
pub mod boot_counter;
pub mod bus;
pub mod flash;
pub mod led;
pub mod output;
pub mod receiver;
pub mod sensor;
pub mod serial;
pub mod storage;
pub mod system;
pub mod timer;
pub mod usb;
pub mod watchdog;

// Re-export trait interfaces
pub use board::Board;
pub use boot_counter::BootCounter;
pub use bus::{BusInterface, I2cBus, SpiBus};
pub use flash::FlashInterface;
pub use led::LedInterface;
pub use output::OutputInterface;
pub use receiver::ReceiverInterface;
pub use sensor::SensorInterface;
pub use serial::SerialInterface;
pub use storage::{Filesystem, StorageInterface};
pub use system::{SystemInterface, TimerBank};
pub use timer::TimerInterface;
pub use usb::{UsbDescriptor, UsbInterface};
pub use watchdog::WatchdogInterface;
