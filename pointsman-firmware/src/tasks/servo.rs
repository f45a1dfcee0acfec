//! Servo task
//!
//! Owns the PCA9685 board. Commands from the control task are applied to
//! a slew-limited servo bank, and whatever changed is written out once per
//! update period.

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Ticker, Timer};

use pointsman_drivers::servo::pca9685::OUTPUTS;
use pointsman_drivers::servo::{Pca9685, ServoBank};
use pointsman_hal_rp2040::i2c::Rp2040I2c;

use crate::channels::SERVO_CMD;
use crate::config::{SERVO_UPDATE_MS, SLEW};

/// The servo board as wired on this board
pub type ServoPwm = Pca9685<Rp2040I2c<I2c<'static, I2C0, Blocking>>>;

/// Servo task - drains the command queue and drives the outputs
#[embassy_executor::task]
pub async fn servo_task(mut pwm: ServoPwm) {
    info!("Servo task started");

    loop {
        match pwm.init().and_then(|_| pwm.is_running()) {
            Ok(true) => break,
            Ok(false) => warn!("PCA9685 did not leave sleep, retrying"),
            Err(e) => warn!("PCA9685 init failed: {}, retrying", e),
        }
        Timer::after_secs(1).await;
    }
    // Oscillator start-up
    Timer::after_micros(500).await;
    info!("PCA9685 ready, prescale {}", pwm.config().prescale());

    let mut bank: ServoBank<{ OUTPUTS as usize }> = ServoBank::new(SLEW);
    let mut ticker = Ticker::every(Duration::from_millis(SERVO_UPDATE_MS as u64));
    let mut settled = true;

    loop {
        ticker.next().await;

        while let Ok(cmd) = SERVO_CMD.try_receive() {
            if !bank.apply(cmd) {
                warn!("No servo output {}", cmd.channel);
            }
        }

        for (channel, angle) in bank.update() {
            if let Err(e) = pwm.set_angle(channel, angle) {
                warn!("Servo {} write failed: {}", channel, e);
            }
        }

        let now_settled = bank.is_settled();
        if now_settled && !settled {
            debug!("All servos at target");
        }
        settled = now_settled;
    }
}
