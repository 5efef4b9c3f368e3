//! Terminal fault loops
//!
//! The only exits are an external reset or the watchdog, and the blink loop
//! keeps the watchdog fed.

use brain_board_core::fault::{blink_cycle, BlinkStep};
use brain_board_core::FaultCode;
use embedded_hal::delay::DelayNs;

use crate::platform::traits::{LedInterface, WatchdogInterface};

/// Execute one pulse group and its pause
pub fn run_blink_cycle<B>(board: &mut B, code: FaultCode)
where
    B: LedInterface + WatchdogInterface + DelayNs,
{
    for step in blink_cycle(code) {
        match step {
            BlinkStep::ClearWatchdog => board.watchdog_clear(),
            BlinkStep::LedOn => board.led_on(),
            BlinkStep::LedOff => board.led_off(),
            BlinkStep::Wait(ms) => board.delay_ms(ms),
        }
    }
    crate::log_trace!("fault blink cycle done ({} pulses)", code.pulses());
}

/// Blink `code` forever
pub fn signal<B>(board: &mut B, code: FaultCode) -> !
where
    B: LedInterface + WatchdogInterface + DelayNs,
{
    crate::log_error!("bring-up fault {}, blinking", code.pulses());
    loop {
        run_blink_cycle(board, code);
    }
}

/// Stop without a diagnostic code
///
/// The LED is left on and the watchdog is no longer cleared, so an armed
/// watchdog resets the board.
pub fn halt<B>(board: &mut B, stage: &'static str) -> !
where
    B: LedInterface,
{
    crate::log_error!("bring-up halted in {}", stage);
    board.led_on();
    loop {
        core::hint::spin_loop();
    }
}
