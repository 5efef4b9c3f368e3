//! Flash interface trait
//!
//! Raw access to a flash partition. Bring-up itself only uses it for the
//! boot counter record; the settings and waypoint filesystems sit on top of
//! the same devices but are mounted through [`StorageInterface`].
//!
//! [`StorageInterface`]: super::StorageInterface

use crate::platform::Result;

/// Flash interface trait
///
/// # Flash Characteristics
///
/// - Flash is organized in sectors (4 KB on the external MX25 part)
/// - Erase operations set all bytes to 0xFF
/// - Write operations can only change bits from 1→0 (must erase first to reset to 1)
///
/// # Safety Invariants
///
/// - Flash device must be initialized before use
/// - Only one owner per Flash instance (no concurrent access)
/// - Implementations must reject addresses outside the partition they expose
pub trait FlashInterface {
    /// Read `buf.len()` bytes starting at `address`
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::InvalidAddress)` if address is out of bounds.
    /// Returns `PlatformError::Flash(FlashError::ReadFailed)` if the read operation fails.
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()>;

    /// Write `data` starting at `address`
    ///
    /// The target region must have been erased first.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::InvalidAddress)` if address is out of bounds.
    /// Returns `PlatformError::Flash(FlashError::WriteFailed)` if the write operation fails.
    fn write(&mut self, address: u32, data: &[u8]) -> Result<()>;

    /// Erase `size` bytes starting at `address`
    ///
    /// Both must be aligned to [`block_size`](Self::block_size).
    fn erase(&mut self, address: u32, size: u32) -> Result<()>;

    /// Minimum erasable unit size
    fn block_size(&self) -> u32;

    /// Total capacity of the partition in bytes
    fn capacity(&self) -> u32;
}
