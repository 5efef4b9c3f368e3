//! Platform error types
//!
//! This module defines error types for driver entry points. Bring-up mostly
//! only cares whether a driver came up; the variants exist so drivers can say
//! why, and so the IMU can report a missing interrupt line distinctly.

use core::fmt;

use brain_board_core::parameters::ParameterError;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// All driver implementations map their HAL-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    /// I2C operation failed
    I2c(I2cError),
    /// SPI operation failed
    Spi(SpiError),
    /// USART operation failed
    Usart(UsartError),
    /// USB stack or class driver failed
    Usb(UsbError),
    /// Flash or filesystem operation failed
    Flash(FlashError),
    /// Sensor probe, init or self-test failed
    Sensor(SensorError),
    /// Driver initialization failed
    InitializationFailed,
    /// Invalid configuration provided
    InvalidConfig,
    /// Resource not available
    ResourceUnavailable,
}

/// I2C-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I2cError {
    /// Bus error occurred
    BusError,
    /// No acknowledgment received
    Nack,
    /// SDA held low by a slave after clocking it out
    BusStuck,
    /// Timeout occurred
    Timeout,
}

/// SPI-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiError {
    /// Transfer failed
    TransferFailed,
    /// Mode fault
    ModeFault,
}

/// USART-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsartError {
    /// Invalid line settings
    InvalidConfig,
    /// Peripheral already claimed
    InUse,
}

/// USB-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsbError {
    /// Descriptor set rejected
    Descriptor,
    /// Class driver failed to attach
    ClassInit,
}

/// Flash-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashError {
    /// Erase operation failed
    EraseFailed,
    /// Write operation failed
    WriteFailed,
    /// Read operation failed
    ReadFailed,
    /// Invalid address (out of bounds)
    InvalidAddress,
    /// JEDEC id did not match any supported part
    UnknownDevice,
    /// Filesystem could not be mounted or formatted
    MountFailed,
}

/// Sensor-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// No device answered at the expected address
    NotFound,
    /// Device answered but its interrupt line never fired
    MissingIrq,
    /// Self-test out of limits
    SelfTestFailed,
    /// Unexpected WHO_AM_I or register contents
    BadId,
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::I2c(e) => write!(f, "I2C error: {:?}", e),
            PlatformError::Spi(e) => write!(f, "SPI error: {:?}", e),
            PlatformError::Usart(e) => write!(f, "USART error: {:?}", e),
            PlatformError::Usb(e) => write!(f, "USB error: {:?}", e),
            PlatformError::Flash(e) => write!(f, "Flash error: {:?}", e),
            PlatformError::Sensor(e) => write!(f, "Sensor error: {:?}", e),
            PlatformError::InitializationFailed => write!(f, "Driver initialization failed"),
            PlatformError::InvalidConfig => write!(f, "Invalid configuration"),
            PlatformError::ResourceUnavailable => write!(f, "Resource not available"),
        }
    }
}

// From implementations for error conversion
impl From<I2cError> for PlatformError {
    fn from(error: I2cError) -> Self {
        PlatformError::I2c(error)
    }
}

impl From<FlashError> for PlatformError {
    fn from(error: FlashError) -> Self {
        PlatformError::Flash(error)
    }
}

impl From<SensorError> for PlatformError {
    fn from(error: SensorError) -> Self {
        PlatformError::Sensor(error)
    }
}

impl From<UsbError> for PlatformError {
    fn from(error: UsbError) -> Self {
        PlatformError::Usb(error)
    }
}

impl From<ParameterError> for PlatformError {
    fn from(e: ParameterError) -> Self {
        match e {
            ParameterError::InvalidConfig => PlatformError::InvalidConfig,
            ParameterError::StoreFull => PlatformError::ResourceUnavailable,
            ParameterError::ReadOnly => PlatformError::InvalidConfig,
        }
    }
}
