//! Fault codes and the blink pattern
//!
//! A fatal bring-up failure is reported by blinking the heartbeat LED a
//! number of times equal to the fault code, then pausing, forever:
//!
//! ```text
//! code = 3
//!  ___     ___     ___
//! |   |   |   |   |   |
//! |200|100|200|100|200|100|  500  |  500  | (repeat)
//! ```
//!
//! The watchdog is cleared on every edge so the loop is never cut short by a
//! watchdog reset; only an external reset leaves it.

use core::fmt;

/// LED on-time of one pulse (ms)
pub const PULSE_ON_MS: u32 = 200;

/// LED off-time after one pulse (ms)
pub const PULSE_OFF_MS: u32 = 100;

/// Each half of the pause between pulse groups (ms)
pub const GROUP_PAUSE_MS: u32 = 500;

/// Irrecoverable bring-up failure, identified by blink count
///
/// Code 1 covers both flash/filesystem failures and an IMU reporting a
/// missing interrupt line. The two are unrelated but share a blink count on
/// this board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FaultCode {
    /// Flash chip, filesystem mount, or IMU interrupt line missing
    FlashOrImuIrq = 1,
    /// IMU probe/init failed
    Imu = 2,
    /// Internal (gyro) I2C bus stuck
    GyroBusStuck = 3,
    /// MS5611 barometer init or self-test failed
    Ms5611 = 4,
    /// LPS25H barometer init failed
    Lps25h = 5,
    /// Flexi (mag/baro) I2C bus stuck
    AuxBusStuck = 6,
}

impl FaultCode {
    /// Number of LED pulses per group
    pub fn pulses(self) -> u32 {
        self as u32
    }

    /// Look up a fault code from its blink count
    pub fn from_pulses(pulses: u32) -> Option<Self> {
        match pulses {
            1 => Some(Self::FlashOrImuIrq),
            2 => Some(Self::Imu),
            3 => Some(Self::GyroBusStuck),
            4 => Some(Self::Ms5611),
            5 => Some(Self::Lps25h),
            6 => Some(Self::AuxBusStuck),
            _ => None,
        }
    }

    /// Duration of one full pulse group plus pause (ms)
    pub fn cycle_ms(self) -> u32 {
        self.pulses() * (PULSE_ON_MS + PULSE_OFF_MS) + 2 * GROUP_PAUSE_MS
    }
}

impl fmt::Display for FaultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            FaultCode::FlashOrImuIrq => "flash / IMU interrupt",
            FaultCode::Imu => "IMU",
            FaultCode::GyroBusStuck => "gyro I2C bus stuck",
            FaultCode::Ms5611 => "MS5611 barometer",
            FaultCode::Lps25h => "LPS25H barometer",
            FaultCode::AuxBusStuck => "mag/baro I2C bus stuck",
        };
        write!(f, "fault {} ({})", self.pulses(), what)
    }
}

/// One primitive step of the blink loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkStep {
    /// Kick the watchdog
    ClearWatchdog,
    /// Heartbeat LED on
    LedOn,
    /// Heartbeat LED off
    LedOff,
    /// Busy-wait (ms)
    Wait(u32),
}

/// Steps of one pulse group followed by the pause
///
/// Executing this sequence in a loop is the whole fault signaling loop.
pub fn blink_cycle(code: FaultCode) -> impl Iterator<Item = BlinkStep> {
    const PULSE: [BlinkStep; 7] = [
        BlinkStep::ClearWatchdog,
        BlinkStep::LedOn,
        BlinkStep::Wait(PULSE_ON_MS),
        BlinkStep::ClearWatchdog,
        BlinkStep::LedOff,
        BlinkStep::Wait(PULSE_OFF_MS),
        BlinkStep::ClearWatchdog,
    ];
    const PAUSE: [BlinkStep; 4] = [
        BlinkStep::Wait(GROUP_PAUSE_MS),
        BlinkStep::ClearWatchdog,
        BlinkStep::Wait(GROUP_PAUSE_MS),
        BlinkStep::ClearWatchdog,
    ];

    (0..code.pulses())
        .flat_map(|_| PULSE.iter().copied())
        .chain(PAUSE.iter().copied())
}
