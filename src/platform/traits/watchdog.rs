//! Independent watchdog

use crate::platform::Result;

/// Independent watchdog driver
///
/// Once armed the watchdog cannot be stopped. Every step that may block on a
/// bus clears it.
pub trait WatchdogInterface {
    /// Arm the watchdog
    fn watchdog_init(&mut self) -> Result<()>;

    /// Reload the watchdog counter
    ///
    /// Must be harmless when the watchdog was never armed.
    fn watchdog_clear(&mut self);

    /// A debug probe holds the core (halting debug enabled)
    ///
    /// The watchdog is left unarmed in that case, otherwise every breakpoint
    /// would reset the board.
    fn debugger_attached(&self) -> bool;
}
