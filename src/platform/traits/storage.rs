//! Flash devices and filesystem mounts
//!
//! Brain carries the MCU's internal flash and an MX25 JEDEC part on the
//! flash SPI bus. Settings and waypoints each live in their own log-structured
//! filesystem partition.

use brain_board_core::handle::BusHandle;

use crate::platform::Result;

/// Filesystem partitions mounted at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filesystem {
    /// Persisted settings objects
    Settings,
    /// Mission waypoints
    Waypoints,
}

impl Filesystem {
    /// Partition label
    pub fn label(self) -> &'static str {
        match self {
            Filesystem::Settings => "settings",
            Filesystem::Waypoints => "waypoints",
        }
    }
}

/// Flash storage bring-up interface
pub trait StorageInterface {
    /// Initialize the MCU's internal flash driver
    fn flash_internal_init(&mut self) -> Result<()>;

    /// Probe and initialize the JEDEC flash on `spi`
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::UnknownDevice)` if the JEDEC
    /// id does not match a supported part.
    fn flash_jedec_init(&mut self, spi: BusHandle) -> Result<()>;

    /// Mount a filesystem partition, formatting it if it is blank
    fn mount_filesystem(&mut self, fs: Filesystem) -> Result<()>;
}
