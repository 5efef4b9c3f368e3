//! I2C and SPI bus bring-up
//!
//! Transfers on these buses belong to the sensor and flash drivers. Bring-up
//! only creates the bus instances and checks that no slave is holding the
//! data line low.

use brain_board_core::handle::BusHandle;

use crate::platform::Result;

/// I2C bus instances on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I2cBus {
    /// IMU and barometer
    Internal,
    /// Flexi port pins in I2C mode (external magnetometer)
    Flexi,
}

/// SPI bus instances on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiBus {
    /// External JEDEC flash
    Flash,
}

/// Bus bring-up interface
pub trait BusInterface {
    /// Create an I2C bus instance
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` if the peripheral cannot be configured.
    fn i2c_init(&mut self, bus: I2cBus) -> Result<BusHandle>;

    /// Check that SDA is released
    ///
    /// One call performs a single check; a slave that was reset mid-transfer
    /// may need a few clock pulses before it lets go, so callers retry a
    /// bounded number of times.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c(I2cError::BusStuck)` while SDA is held low.
    fn i2c_check_clear(&mut self, bus: BusHandle) -> Result<()>;

    /// Create an SPI bus instance
    fn spi_init(&mut self, bus: SpiBus) -> Result<BusHandle>;
}
