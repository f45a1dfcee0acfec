//! Persistent storage abstractions
//!
//! Provides a byte-addressable persistent store, the shape of an EEPROM.
//! Chip-specific HALs back it with whatever non-volatile memory they have
//! (the RP2040 uses a reserved flash sector).

/// Errors from persistent storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Access past the end of the store
    OutOfBounds,
    /// Underlying memory operation failed
    Io,
    /// Data read back does not match what was written
    Corrupted,
}

/// Byte-addressable persistent store
///
/// Implementations must make `write` durable before returning. A single
/// `write` call is the unit callers rely on: the controller always writes
/// its whole record in one call, so implementations that buffer or
/// erase-then-program must not leave a partially written range visible
/// after a successful return.
pub trait PersistentStore {
    /// Total number of addressable bytes
    fn capacity(&self) -> usize;

    /// Read `buffer.len()` bytes starting at `offset`
    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), StoreError>;

    /// Write `data` starting at `offset`
    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StoreError>;

    /// Read a single byte
    fn read_byte(&mut self, offset: usize) -> Result<u8, StoreError> {
        let mut byte = [0u8; 1];
        self.read(offset, &mut byte)?;
        Ok(byte[0])
    }
}

/// Check that `len` bytes at `offset` fit inside a store of `capacity` bytes
pub fn check_bounds(capacity: usize, offset: usize, len: usize) -> Result<(), StoreError> {
    match offset.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(StoreError::OutOfBounds),
    }
}
