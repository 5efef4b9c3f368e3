//! Timer interface trait
//!
//! Bring-up only needs busy-wait delays and a monotonic clock. Delays come
//! from `embedded_hal::delay::DelayNs`, so any HAL delay provider can back
//! the board; the clock is added on top.

use embedded_hal::delay::DelayNs;

/// Timer interface trait
///
/// # Safety Invariants
///
/// - Delay system must be initialized before use
/// - Monotonic time source (never goes backwards)
pub trait TimerInterface: DelayNs {
    /// Get current time in microseconds
    ///
    /// Returns a monotonic timestamp in microseconds since the delay system
    /// was initialized.
    fn now_us(&self) -> u64;

    /// Get current time in milliseconds
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}
