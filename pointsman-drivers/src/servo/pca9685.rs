//! PCA9685 16-channel PWM driver
//!
//! The PCA9685 generates 16 independent 12-bit PWM outputs from an internal
//! 25 MHz oscillator. For hobby servos it runs at 50 Hz, giving a 20 ms
//! frame split into 4096 ticks (about 4.9 µs per tick).
//!
//! # Register access
//!
//! Every output has four registers (ON_L, ON_H, OFF_L, OFF_H) starting at
//! `LED0_ON_L + 4 * channel`. With auto-increment enabled all four are
//! written in one I2C transaction. Outputs switch on at tick 0 and off at
//! the tick matching the pulse width.
//!
//! # Prescaler
//!
//! The frame rate can only be changed while the chip sleeps:
//!
//! ```text
//! prescale = round(25 MHz / (4096 * f)) - 1      (121 for 50 Hz)
//! ```

use pointsman_hal::I2cBus;

/// PCA9685 register addresses
pub mod reg {
    /// Mode register 1
    pub const MODE1: u8 = 0x00;
    /// Mode register 2
    pub const MODE2: u8 = 0x01;
    /// First output register (LED0_ON_L)
    pub const LED0_ON_L: u8 = 0x06;
    /// All-outputs OFF_H register
    pub const ALL_LED_OFF_H: u8 = 0xFD;
    /// Prescaler for the output frequency
    pub const PRE_SCALE: u8 = 0xFE;
}

/// MODE1 bits
pub mod mode1 {
    pub const AUTO_INCREMENT: u8 = 0x20;
    pub const SLEEP: u8 = 0x10;
    pub const ALLCALL: u8 = 0x01;
}

/// MODE2 totem-pole output drive
pub const MODE2_OUTDRV: u8 = 0x04;

/// Factory I2C address (A0..A5 low)
pub const DEFAULT_ADDRESS: u8 = 0x40;

/// Internal oscillator frequency
pub const OSCILLATOR_HZ: u32 = 25_000_000;

/// Number of PWM outputs
pub const OUTPUTS: u8 = 16;

/// PWM resolution (ticks per frame)
const TICKS_PER_FRAME: u32 = 4096;

/// Full-off flag in the OFF_H register
const FULL_OFF: u8 = 0x10;

/// PCA9685 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError<E> {
    /// I2C transfer failed
    Bus(E),
    /// Output index above 15
    InvalidChannel,
}

/// Pulse widths for the ends of the servo's travel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseRange {
    /// Pulse for 0 degrees (µs)
    pub min_us: u16,
    /// Pulse for `max_angle` degrees (µs)
    pub max_us: u16,
    /// Angle reached at `max_us`
    pub max_angle: u8,
}

impl Default for PulseRange {
    fn default() -> Self {
        Self {
            min_us: 500,
            max_us: 2500,
            max_angle: 180,
        }
    }
}

impl PulseRange {
    /// Pulse width for an angle, clamped to the range
    pub fn angle_to_us(&self, angle: u8) -> u16 {
        if self.max_angle == 0 {
            return self.min_us;
        }
        let angle = angle.min(self.max_angle) as u32;
        let span = self.max_us.saturating_sub(self.min_us) as u32;
        self.min_us + (span * angle / self.max_angle as u32) as u16
    }
}

/// PCA9685 driver configuration
#[derive(Debug, Clone, Copy)]
pub struct Pca9685Config {
    /// 7-bit I2C address
    pub address: u8,
    /// Output frame rate (Hz)
    pub frequency_hz: u32,
    /// Servo pulse calibration
    pub pulse: PulseRange,
}

impl Default for Pca9685Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            frequency_hz: 50,
            pulse: PulseRange::default(),
        }
    }
}

impl Pca9685Config {
    /// Prescaler value for the configured frame rate
    pub fn prescale(&self) -> u8 {
        let divisor = TICKS_PER_FRAME * self.frequency_hz.max(1);
        let rounded = (OSCILLATOR_HZ + divisor / 2) / divisor;
        // Hardware limits
        rounded.saturating_sub(1).clamp(3, 255) as u8
    }

    /// Convert a pulse width to an OFF tick
    pub fn us_to_ticks(&self, pulse_us: u16) -> u16 {
        let ticks =
            pulse_us as u64 * TICKS_PER_FRAME as u64 * self.frequency_hz as u64 / 1_000_000;
        ticks.min(TICKS_PER_FRAME as u64 - 1) as u16
    }

    /// Convert an angle to an OFF tick
    pub fn angle_to_ticks(&self, angle: u8) -> u16 {
        self.us_to_ticks(self.pulse.angle_to_us(angle))
    }
}

/// PCA9685 PWM board
pub struct Pca9685<I2C> {
    i2c: I2C,
    config: Pca9685Config,
}

impl<I2C: I2cBus> Pca9685<I2C> {
    /// Create a driver; call [`Pca9685::init`] before use
    pub fn new(i2c: I2C, config: Pca9685Config) -> Self {
        Self { i2c, config }
    }

    pub fn config(&self) -> &Pca9685Config {
        &self.config
    }

    /// Program the frame rate and wake the chip
    ///
    /// The oscillator needs 500 µs after wake-up before outputs are
    /// accurate; the caller waits before sending the first pulse.
    pub fn init(&mut self) -> Result<(), DriverError<I2C::Error>> {
        self.write_reg(reg::MODE1, mode1::SLEEP | mode1::ALLCALL)?;
        self.write_reg(reg::PRE_SCALE, self.config.prescale())?;
        self.write_reg(reg::MODE2, MODE2_OUTDRV)?;
        self.write_reg(reg::MODE1, mode1::AUTO_INCREMENT | mode1::ALLCALL)?;
        // All outputs off until the first angle arrives
        self.write_reg(reg::ALL_LED_OFF_H, FULL_OFF)?;
        Ok(())
    }

    /// Read back MODE1
    pub fn mode1(&mut self) -> Result<u8, DriverError<I2C::Error>> {
        self.i2c
            .read_register(self.config.address, reg::MODE1)
            .map_err(DriverError::Bus)
    }

    /// Check that `init` took: oscillator awake, auto-increment on
    ///
    /// A board that browned out or was reset by another bus master reads
    /// back its power-on MODE1 (sleeping, no auto-increment).
    pub fn is_running(&mut self) -> Result<bool, DriverError<I2C::Error>> {
        let mode = self.mode1()?;
        Ok(mode & mode1::SLEEP == 0 && mode & mode1::AUTO_INCREMENT != 0)
    }

    /// Set an output's pulse in ticks (ON at 0, OFF at `off`)
    pub fn set_ticks(&mut self, channel: u8, off: u16) -> Result<(), DriverError<I2C::Error>> {
        if channel >= OUTPUTS {
            return Err(DriverError::InvalidChannel);
        }
        let off = off.min(TICKS_PER_FRAME as u16 - 1);
        let frame = [
            reg::LED0_ON_L + 4 * channel,
            0,
            0,
            (off & 0xFF) as u8,
            (off >> 8) as u8,
        ];
        self.i2c
            .write(self.config.address, &frame)
            .map_err(DriverError::Bus)
    }

    /// Point a servo at an angle
    pub fn set_angle(&mut self, channel: u8, angle: u8) -> Result<(), DriverError<I2C::Error>> {
        let ticks = self.config.angle_to_ticks(angle);
        self.set_ticks(channel, ticks)
    }

    /// Stop driving an output (servo goes limp)
    pub fn release(&mut self, channel: u8) -> Result<(), DriverError<I2C::Error>> {
        if channel >= OUTPUTS {
            return Err(DriverError::InvalidChannel);
        }
        let frame = [reg::LED0_ON_L + 4 * channel, 0, 0, 0, FULL_OFF];
        self.i2c
            .write(self.config.address, &frame)
            .map_err(DriverError::Bus)
    }

    /// Release the bus
    pub fn into_inner(self) -> I2C {
        self.i2c
    }

    fn write_reg(&mut self, register: u8, value: u8) -> Result<(), DriverError<I2C::Error>> {
        self.i2c
            .write_register(self.config.address, register, value)
            .map_err(DriverError::Bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock I2C bus recording every write
    #[derive(Default)]
    struct MockBus {
        writes: Vec<(u8, Vec<u8>)>,
        mode1: u8,
        fail: bool,
    }

    impl I2cBus for MockBus {
        type Error = ();

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.writes.push((address, data.to_vec()));
            Ok(())
        }

        fn write_read(&mut self, _address: u8, _write: &[u8], read: &mut [u8]) -> Result<(), ()> {
            read[0] = self.mode1;
            Ok(())
        }
    }

    #[test]
    fn test_prescale_50hz() {
        assert_eq!(Pca9685Config::default().prescale(), 121);

        let fast = Pca9685Config {
            frequency_hz: 1_000,
            ..Pca9685Config::default()
        };
        assert_eq!(fast.prescale(), 5);
    }

    #[test]
    fn test_angle_to_pulse() {
        let range = PulseRange::default();
        assert_eq!(range.angle_to_us(0), 500);
        assert_eq!(range.angle_to_us(90), 1500);
        assert_eq!(range.angle_to_us(180), 2500);
        // Past the end of travel
        assert_eq!(range.angle_to_us(200), 2500);
    }

    #[test]
    fn test_pulse_to_ticks() {
        let config = Pca9685Config::default();
        // 20 ms frame, 4096 ticks
        assert_eq!(config.us_to_ticks(500), 102);
        assert_eq!(config.us_to_ticks(1500), 307);
        assert_eq!(config.us_to_ticks(2500), 512);
        assert_eq!(config.us_to_ticks(30_000), 4095);
        assert_eq!(config.angle_to_ticks(90), 307);
    }

    #[test]
    fn test_init_sequence() {
        let mut pwm = Pca9685::new(MockBus::default(), Pca9685Config::default());
        pwm.init().unwrap();

        let bus = pwm.into_inner();
        let writes: Vec<Vec<u8>> = bus.writes.into_iter().map(|(_, d)| d).collect();
        assert_eq!(
            writes,
            vec![
                vec![reg::MODE1, 0x11],
                vec![reg::PRE_SCALE, 121],
                vec![reg::MODE2, 0x04],
                vec![reg::MODE1, 0x21],
                vec![reg::ALL_LED_OFF_H, 0x10],
            ]
        );
    }

    #[test]
    fn test_set_angle_frame() {
        let mut pwm = Pca9685::new(MockBus::default(), Pca9685Config::default());
        pwm.set_angle(3, 90).unwrap();

        let bus = pwm.into_inner();
        // 307 ticks = 0x0133
        assert_eq!(bus.writes, vec![(0x40, vec![0x12, 0, 0, 0x33, 0x01])]);
    }

    #[test]
    fn test_invalid_channel() {
        let mut pwm = Pca9685::new(MockBus::default(), Pca9685Config::default());
        assert_eq!(pwm.set_angle(16, 90), Err(DriverError::InvalidChannel));
        assert_eq!(pwm.release(16), Err(DriverError::InvalidChannel));
    }

    #[test]
    fn test_bus_error() {
        let bus = MockBus {
            fail: true,
            ..MockBus::default()
        };
        let mut pwm = Pca9685::new(bus, Pca9685Config::default());
        assert_eq!(pwm.set_angle(0, 0), Err(DriverError::Bus(())));
    }

    #[test]
    fn test_running_check() {
        let awake = MockBus {
            mode1: 0x21,
            ..MockBus::default()
        };
        assert_eq!(Pca9685::new(awake, Pca9685Config::default()).is_running(), Ok(true));

        // Power-on default: sleeping
        let asleep = MockBus {
            mode1: 0x11,
            ..MockBus::default()
        };
        assert_eq!(Pca9685::new(asleep, Pca9685Config::default()).is_running(), Ok(false));
    }

    #[test]
    fn test_mode1_readback() {
        let bus = MockBus {
            mode1: 0x21,
            ..MockBus::default()
        };
        let mut pwm = Pca9685::new(bus, Pca9685Config::default());
        assert_eq!(pwm.mode1(), Ok(0x21));
    }
}
