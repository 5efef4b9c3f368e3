//! Heartbeat LED

use crate::platform::Result;

/// Heartbeat LED driver
///
/// The LED is the only diagnostic output available before the scheduler
/// starts, so `on`/`off` cannot fail once `led_init` succeeded.
pub trait LedInterface {
    /// Configure the LED pin
    fn led_init(&mut self) -> Result<()>;

    /// Drive the heartbeat LED on
    fn led_on(&mut self);

    /// Drive the heartbeat LED off
    fn led_off(&mut self);
}
