//! Clocks, timers and miscellaneous on-chip peripherals

use crate::platform::Result;

/// Hardware timer groups whose clocks are configured at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerBank {
    /// Receiver-port input capture (PWM/PPM)
    RcvrInputs,
    /// Second input-capture timer
    AuxInputs,
    /// Servo outputs
    ServoOutputs,
}

/// On-chip peripheral bring-up
pub trait SystemInterface {
    /// Start the microsecond delay system
    fn delay_init(&mut self) -> Result<()>;

    /// Start the real-time clock and its tick
    fn rtc_init(&mut self) -> Result<()>;

    /// Configure the clock of one timer bank
    fn timer_clock_init(&mut self, bank: TimerBank) -> Result<()>;

    /// Initialize the generic GPIO driver
    fn gpio_init(&mut self) -> Result<()>;

    /// Initialize the internal ADC
    fn adc_init(&mut self) -> Result<()>;
}
