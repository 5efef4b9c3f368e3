//! Boot attempt counting
//!
//! Every boot increments a persisted counter. Reaching the threshold means
//! the last boots never got far enough to clear it, so the configuration is
//! put back to factory defaults and the boot-fault alarm is raised. Boot
//! continues either way.

use brain_board_core::alarms::AlarmSeverity;
use brain_board_core::boot_count::{
    decode_boot_record, encode_boot_record, evaluate_boot_count, BootCountAction, BOOT_RECORD_LEN,
};
use brain_board_core::parameters::{HardwareConfiguration, ModuleParams, ParameterStore};

use super::abort::{BootAbort, OrAbort};
use crate::platform::traits::{BootCounter, FlashInterface};
use crate::platform::Result;

/// Boot counter kept in one flash sector
///
/// The record is magic + count + CRC-32, so erased or torn sectors read as
/// a count of 0.
#[derive(Debug)]
pub struct FlashBootCounter<F: FlashInterface> {
    flash: F,
    address: u32,
}

impl<F: FlashInterface> FlashBootCounter<F> {
    /// Keep the counter in the sector starting at `address`
    pub fn new(flash: F, address: u32) -> Self {
        Self { flash, address }
    }

    /// Give the flash back
    pub fn into_inner(self) -> F {
        self.flash
    }
}

impl<F: FlashInterface> BootCounter for FlashBootCounter<F> {
    fn read(&mut self) -> Result<u16> {
        let mut buf = [0u8; BOOT_RECORD_LEN];
        self.flash.read(self.address, &mut buf)?;
        Ok(decode_boot_record(&buf).unwrap_or(0))
    }

    fn write(&mut self, count: u16) -> Result<()> {
        let block = self.flash.block_size();
        self.flash.erase(self.address, block)?;
        self.flash.write(self.address, &encode_boot_record(count))
    }
}

/// Record that the system came up fully
///
/// Called by the running system once it is stable, never by bring-up.
pub fn mark_boot_successful<C: BootCounter>(counter: &mut C) -> Result<()> {
    counter.write(0)
}

/// Count this boot and reset the configuration if too many boots failed
///
/// Returns the boot-fault alarm severity. Counter storage errors are logged
/// and do not stop the boot.
pub fn apply_boot_count<C: BootCounter>(
    counter: &mut C,
    store: &mut ParameterStore,
) -> core::result::Result<AlarmSeverity, BootAbort> {
    let count = counter.read().unwrap_or_else(|_| {
        crate::log_warn!("boot counter unreadable, assuming 0");
        0
    });

    match evaluate_boot_count(count) {
        BootCountAction::Proceed { next } => {
            crate::log_debug!("boot attempt {}", next);
            if counter.write(next).is_err() {
                crate::log_warn!("boot counter write failed");
            }
            Ok(AlarmSeverity::Ok)
        }
        BootCountAction::ForceDefaults => {
            crate::log_error!("{} failed boots, restoring default configuration", count);
            HardwareConfiguration::reset_defaults(store).or_halt("hardware settings reset")?;
            ModuleParams::reset_defaults(store).or_halt("module settings reset")?;
            Ok(AlarmSeverity::Critical)
        }
    }
}
