//! I2C master abstraction
//!
//! The only I2C device on the board is the servo PWM chip, which is driven
//! entirely through 8-bit registers. Chip HALs implement the two raw
//! transfers; register helpers come for free.

/// Blocking I2C master
pub trait I2cBus {
    /// Transfer error
    type Error;

    /// Write `data` to the device at the 7-bit `address`
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Write `write_data`, then read into `read_buf` after a repeated start
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Set one register
    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error> {
        self.write(address, &[register, value])
    }

    /// Read one register
    fn read_register(&mut self, address: u8, register: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.write_read(address, &[register], &mut buf)?;
        Ok(buf[0])
    }
}

/// Bus clock settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// SCL frequency in Hz
    pub frequency: u32,
}

impl I2cConfig {
    /// Fast mode, the PCA9685's rated maximum below Fast-mode Plus
    pub const FAST: Self = Self { frequency: 400_000 };
}
