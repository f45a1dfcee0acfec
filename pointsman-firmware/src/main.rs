//! Pointsman - Dual-Position Servo Controller Firmware
//!
//! Main firmware binary for RP2040 boards. Each binary input selects one
//! of two stored angles for its servo; a four-button panel trims the
//! angles, and the table is saved to flash once editing stops.
//!
//! # Wiring
//!
//! | Signal            | GPIO      | Notes                             |
//! |-------------------|-----------|-----------------------------------|
//! | Channel inputs    | 2-17      | Channel n on GPIO(2 + n), pulled down |
//! | NextChannel       | 18        | Active-low, pull-up enabled       |
//! | NextSlot          | 19        | Active-low, pull-up enabled       |
//! | Increase          | 20        | Active-low, pull-up enabled       |
//! | Decrease          | 21        | Active-low, pull-up enabled       |
//! | I2C0 SDA          | 0         | PCA9685 servo board               |
//! | I2C0 SCL          | 1         | PCA9685 servo board               |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::AnyPin;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::Peri;
use heapless::Vec;
use {defmt_rtt as _, panic_probe as _};

use pointsman_core::config::MAX_CHANNELS;
use pointsman_core::input::ButtonPanel;
use pointsman_drivers::servo::Pca9685;
use pointsman_hal::I2cConfig;
use pointsman_hal_rp2040::flash::FlashStore;
use pointsman_hal_rp2040::gpio::RpInput;
use pointsman_hal_rp2040::i2c::Rp2040I2c;

mod actuator;
mod channels;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pointsman firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Channel inputs: only the configured number are claimed
    let channel_pins: [Peri<'static, AnyPin>; MAX_CHANNELS] = [
        p.PIN_2.into(),
        p.PIN_3.into(),
        p.PIN_4.into(),
        p.PIN_5.into(),
        p.PIN_6.into(),
        p.PIN_7.into(),
        p.PIN_8.into(),
        p.PIN_9.into(),
        p.PIN_10.into(),
        p.PIN_11.into(),
        p.PIN_12.into(),
        p.PIN_13.into(),
        p.PIN_14.into(),
        p.PIN_15.into(),
        p.PIN_16.into(),
        p.PIN_17.into(),
    ];
    let inputs: Vec<RpInput<'static>, MAX_CHANNELS> = channel_pins
        .into_iter()
        .take(config::CONTROLLER.channels())
        .map(RpInput::pulled_down)
        .collect();

    let panel = ButtonPanel::new(
        RpInput::pulled_up(p.PIN_18),
        RpInput::pulled_up(p.PIN_19),
        RpInput::pulled_up(p.PIN_20),
        RpInput::pulled_up(p.PIN_21),
    );
    info!("{} channel inputs and button panel initialized", inputs.len());

    // Servo board on I2C0
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2cConfig::FAST.frequency;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_1, p.PIN_0, i2c_config);
    let pwm = Pca9685::new(Rp2040I2c::new(i2c), config::PCA9685);
    info!("I2C initialized for servo board at {=u8:#x}", config::PCA9685.address);

    let store = FlashStore::new(p.FLASH);

    // Spawn tasks
    spawner.spawn(tasks::servo_task(pwm)).unwrap();
    spawner
        .spawn(tasks::control_task(store, inputs, panel))
        .unwrap();

    info!("All tasks spawned, firmware running");
}
