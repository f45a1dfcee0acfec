//! Flash-backed persistent store for RP2040
//!
//! The RP2040 has no EEPROM, so the channel table lives in the last 4 KiB
//! erase sector of the external QSPI flash. Reads go straight to flash.
//! A write reads the store's range into RAM, patches it, erases the sector
//! and programs the range back, so every call rewrites the whole record.
//!
//! Implements the `PersistentStore` trait from `pointsman-hal`.

use embassy_rp::flash::{Blocking, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use pointsman_hal::store::check_bounds;
use pointsman_hal::{PersistentStore, StoreError};

/// Flash size on the Pico board
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Offset of the reserved sector (the last one)
pub const STORE_SECTOR_START: u32 = (FLASH_SIZE - ERASE_SIZE) as u32;

/// Bytes exposed as the store
///
/// One flash page, comfortably above the largest controller record.
pub const STORE_CAPACITY: usize = 256;

/// RP2040 flash store
pub struct FlashStore<'d> {
    flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>,
}

impl<'d> FlashStore<'d> {
    /// Create a new flash store
    pub fn new(flash: Peri<'d, FLASH>) -> Self {
        Self {
            flash: Flash::new_blocking(flash),
        }
    }

    /// Erase the reserved sector (the next boot reinitializes)
    pub fn erase(&mut self) -> Result<(), StoreError> {
        self.flash
            .blocking_erase(STORE_SECTOR_START, STORE_SECTOR_START + ERASE_SIZE as u32)
            .map_err(|_| StoreError::Io)
    }
}

impl PersistentStore for FlashStore<'_> {
    fn capacity(&self) -> usize {
        STORE_CAPACITY
    }

    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), StoreError> {
        check_bounds(STORE_CAPACITY, offset, buffer.len())?;
        self.flash
            .blocking_read(STORE_SECTOR_START + offset as u32, buffer)
            .map_err(|_| StoreError::Io)
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StoreError> {
        check_bounds(STORE_CAPACITY, offset, data.len())?;

        let mut image = [0u8; STORE_CAPACITY];
        self.flash
            .blocking_read(STORE_SECTOR_START, &mut image)
            .map_err(|_| StoreError::Io)?;
        image[offset..offset + data.len()].copy_from_slice(data);

        self.erase()?;
        self.flash
            .blocking_write(STORE_SECTOR_START, &image)
            .map_err(|_| StoreError::Io)?;

        // Verify the range the caller asked for
        let mut check = [0u8; STORE_CAPACITY];
        let check = &mut check[..data.len()];
        self.read(offset, check)?;
        if check[..] != data[..] {
            return Err(StoreError::Corrupted);
        }

        Ok(())
    }
}
