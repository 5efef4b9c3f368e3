//! Mock Flash implementation for testing
//!
//! Provides an in-memory flash partition for unit tests.

use crate::platform::{error::FlashError, traits::FlashInterface, Result};
use core::cell::RefCell;
use std::vec::Vec;

/// Flash sector size (4 KB)
const BLOCK_SIZE: u32 = 4096;

/// Partition capacity (64 KB)
const FLASH_CAPACITY: u32 = 64 * 1024;

/// Mock Flash implementation
///
/// Simulates one flash partition in memory. Supports:
/// - Read/write/erase operations with NOR semantics
/// - Corruption injection for testing record validation
/// - Erase count tracking
/// - Power-loss simulation (torn writes)
///
/// # Example
///
/// ```ignore
/// use brain_board::platform::mock::MockFlash;
/// use brain_board::platform::traits::FlashInterface;
///
/// let mut flash = MockFlash::new();
/// flash.erase(0, 4096).unwrap();
/// flash.write(0, b"BOOT").unwrap();
///
/// let mut buf = [0u8; 4];
/// flash.read(0, &mut buf).unwrap();
/// assert_eq!(&buf, b"BOOT");
/// ```
#[derive(Debug)]
pub struct MockFlash {
    /// Flash storage (initialized to 0xFF - erased state)
    storage: RefCell<Vec<u8>>,
    /// Erase count per sector
    erase_counts: RefCell<Vec<u32>>,
    /// Simulated power loss flag
    power_loss: RefCell<bool>,
}

impl MockFlash {
    /// Create a fully erased partition
    pub fn new() -> Self {
        let mut storage = Vec::new();
        storage.resize(FLASH_CAPACITY as usize, 0xFF);
        let mut erase_counts = Vec::new();
        erase_counts.resize((FLASH_CAPACITY / BLOCK_SIZE) as usize, 0);

        Self {
            storage: RefCell::new(storage),
            erase_counts: RefCell::new(erase_counts),
            power_loss: RefCell::new(false),
        }
    }

    /// Get Flash contents (for test verification)
    pub fn get_contents(&self, address: u32, len: usize) -> Vec<u8> {
        let storage = self.storage.borrow();
        storage[address as usize..(address as usize + len)].to_vec()
    }

    /// Overwrite bytes with a fixed pattern, bypassing NOR semantics
    pub fn inject_corruption(&mut self, address: u32, len: usize) {
        let mut storage = self.storage.borrow_mut();
        for byte in storage[address as usize..address as usize + len].iter_mut() {
            *byte = 0xAA;
        }
    }

    /// Number of times the sector containing `address` was erased
    pub fn get_erase_count(&self, address: u32) -> u32 {
        let block_id = (address / BLOCK_SIZE) as usize;
        self.erase_counts.borrow()[block_id]
    }

    /// Make the next write stop halfway
    pub fn simulate_power_loss(&mut self) {
        *self.power_loss.borrow_mut() = true;
    }

    fn in_bounds(address: u32, len: usize) -> bool {
        (address as usize)
            .checked_add(len)
            .is_some_and(|end| end <= FLASH_CAPACITY as usize)
    }
}

impl Default for MockFlash {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashInterface for MockFlash {
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        if !Self::in_bounds(address, buf.len()) {
            return Err(FlashError::InvalidAddress.into());
        }

        let storage = self.storage.borrow();
        buf.copy_from_slice(&storage[address as usize..(address as usize + buf.len())]);
        Ok(())
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<()> {
        if !Self::in_bounds(address, data.len()) {
            return Err(FlashError::InvalidAddress.into());
        }

        let write_len = if self.power_loss.replace(false) {
            data.len() / 2
        } else {
            data.len()
        };

        // Flash can only change bits from 1→0
        let mut storage = self.storage.borrow_mut();
        for (i, byte) in data.iter().take(write_len).enumerate() {
            storage[address as usize + i] &= *byte;
        }

        Ok(())
    }

    fn erase(&mut self, address: u32, size: u32) -> Result<()> {
        if !address.is_multiple_of(BLOCK_SIZE) || !size.is_multiple_of(BLOCK_SIZE) {
            return Err(FlashError::InvalidAddress.into());
        }
        if !Self::in_bounds(address, size as usize) {
            return Err(FlashError::InvalidAddress.into());
        }

        let mut storage = self.storage.borrow_mut();
        for byte in storage[address as usize..(address + size) as usize].iter_mut() {
            *byte = 0xFF;
        }

        let start_block = (address / BLOCK_SIZE) as usize;
        let mut erase_counts = self.erase_counts.borrow_mut();
        for count in erase_counts
            .iter_mut()
            .skip(start_block)
            .take((size / BLOCK_SIZE) as usize)
        {
            *count += 1;
        }

        Ok(())
    }

    fn block_size(&self) -> u32 {
        BLOCK_SIZE
    }

    fn capacity(&self) -> u32 {
        FLASH_CAPACITY
    }
}
