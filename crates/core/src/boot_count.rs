//! Boot attempt counter
//!
//! Every boot increments a persisted counter that is independent of the
//! hardware configuration. Something outside bring-up resets it once the
//! system has run long enough to call the boot good. If the counter has
//! already reached [`BOOT_FAULT_THRESHOLD`] when a boot starts, the previous
//! attempts are assumed to have been killed by a bad configuration: settings
//! are forced back to factory defaults and the boot-fault alarm is raised.
//! Boot continues either way.
//!
//! # Persisted record
//!
//! ```text
//! offset  size  field
//! 0       4     magic "BOOT"
//! 4       2     count (little endian)
//! 6       2     reserved (0)
//! 8       4     CRC32 of bytes 0..8
//! ```

use crate::crc::{calculate_crc32, validate_crc32};

/// Boot attempts tolerated before configuration is reset
pub const BOOT_FAULT_THRESHOLD: u16 = 3;

/// Magic number for the boot counter record
pub const BOOT_RECORD_MAGIC: [u8; 4] = *b"BOOT";

/// Size of an encoded boot counter record
pub const BOOT_RECORD_LEN: usize = 12;

/// What bring-up does with the boot counter it just read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootCountAction {
    /// Store `next` and clear the boot-fault alarm
    Proceed {
        /// Counter value to persist
        next: u16,
    },
    /// Reset configuration to defaults and raise the boot-fault alarm
    ForceDefaults,
}

/// Decide the boot-count outcome for a counter read at boot
pub fn evaluate_boot_count(count: u16) -> BootCountAction {
    if count < BOOT_FAULT_THRESHOLD {
        BootCountAction::Proceed { next: count + 1 }
    } else {
        BootCountAction::ForceDefaults
    }
}

/// Encode a counter value into its persisted form
pub fn encode_boot_record(count: u16) -> [u8; BOOT_RECORD_LEN] {
    let mut buf = [0u8; BOOT_RECORD_LEN];
    buf[0..4].copy_from_slice(&BOOT_RECORD_MAGIC);
    buf[4..6].copy_from_slice(&count.to_le_bytes());
    let crc = calculate_crc32(&buf[0..8]);
    buf[8..12].copy_from_slice(&crc.to_le_bytes());
    buf
}

/// Decode a persisted record
///
/// Returns `None` for erased flash, a foreign magic, or a CRC mismatch.
pub fn decode_boot_record(buf: &[u8; BOOT_RECORD_LEN]) -> Option<u16> {
    if buf[0..4] != BOOT_RECORD_MAGIC {
        return None;
    }
    let crc = u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    if !validate_crc32(&buf[0..8], crc) {
        return None;
    }
    Some(u16::from_le_bytes([buf[4], buf[5]]))
}
