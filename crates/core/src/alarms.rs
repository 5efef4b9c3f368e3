//! Alarm severities
//!
//! Bring-up raises exactly one alarm itself (boot fault). Severity follows the
//! system alarm scale used by the telemetry side.

use core::fmt;

/// Alarm severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum AlarmSeverity {
    /// Never evaluated
    #[default]
    Uninitialised,
    /// Cleared
    Ok,
    /// Degraded but usable
    Warning,
    /// Subsystem failed
    Error,
    /// Vehicle must not fly
    Critical,
}

impl AlarmSeverity {
    /// True for any severity above `Ok`
    pub fn is_raised(self) -> bool {
        self > AlarmSeverity::Ok
    }
}

impl fmt::Display for AlarmSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlarmSeverity::Uninitialised => "Uninitialised",
            AlarmSeverity::Ok => "OK",
            AlarmSeverity::Warning => "Warning",
            AlarmSeverity::Error => "Error",
            AlarmSeverity::Critical => "Critical",
        };
        f.write_str(s)
    }
}
