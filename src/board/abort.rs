//! Bring-up abort reasons
//!
//! Stages return `Result<_, BootAbort>` and use `?`. Only the reset-vector
//! entry point turns an abort into one of the terminal loops.

use core::fmt;

use brain_board_core::FaultCode;

/// Why bring-up stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootAbort {
    /// Failure with a diagnostic blink code
    Fault(FaultCode),
    /// Any other driver failure; names the stage that failed
    Halt(&'static str),
}

impl fmt::Display for BootAbort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootAbort::Fault(code) => write!(f, "{}", code),
            BootAbort::Halt(stage) => write!(f, "halt in {}", stage),
        }
    }
}

/// Map a driver failure onto a bring-up abort
///
/// The driver error itself is dropped: the blink code (or its absence) is
/// the only diagnostic the board reports.
pub(crate) trait OrAbort<T> {
    /// Fail with a generic halt naming `stage`
    fn or_halt(self, stage: &'static str) -> Result<T, BootAbort>;

    /// Fail with a blink code
    fn or_fault(self, code: FaultCode) -> Result<T, BootAbort>;
}

impl<T, E> OrAbort<T> for Result<T, E> {
    fn or_halt(self, stage: &'static str) -> Result<T, BootAbort> {
        self.map_err(|_| BootAbort::Halt(stage))
    }

    fn or_fault(self, code: FaultCode) -> Result<T, BootAbort> {
        self.map_err(|_| BootAbort::Fault(code))
    }
}
