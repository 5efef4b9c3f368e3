//! Persisted boot attempt counter

use crate::platform::Result;

/// Storage of the boot attempt counter
///
/// The counter survives resets and is independent of the settings
/// filesystem, so wiping settings does not reset it.
pub trait BootCounter {
    /// Read the stored count
    ///
    /// A missing or corrupt record reads as 0.
    fn read(&mut self) -> Result<u16>;

    /// Replace the stored count
    fn write(&mut self, count: u16) -> Result<()>;
}
