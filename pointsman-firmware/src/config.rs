//! Build-time configuration
//!
//! `build.rs` validates `controller.toml` and turns it into constants;
//! this module assembles them into the typed configs the crates expect.

use pointsman_core::config::ControllerConfig;
use pointsman_drivers::servo::{Pca9685Config, PulseRange, SlewConfig};

mod generated {
    include!(concat!(env!("OUT_DIR"), "/controller_config.rs"));
}

use generated::*;

/// Controller configuration
pub const CONTROLLER: ControllerConfig = ControllerConfig {
    channel_count: CONTROLLER_CHANNELS,
    min_pos: CONTROLLER_MIN_POS,
    max_pos: CONTROLLER_MAX_POS,
    quiet_period_ms: CONTROLLER_QUIET_PERIOD_MS,
    repeat_initial_ms: CONTROLLER_REPEAT_INITIAL_MS,
    repeat_step_ms: CONTROLLER_REPEAT_STEP_MS,
    repeat_floor_ms: CONTROLLER_REPEAT_FLOOR_MS,
    long_hold_ms: CONTROLLER_LONG_HOLD_MS,
    marker: CONTROLLER_MARKER,
    poll_interval_ms: CONTROLLER_POLL_INTERVAL_MS,
};

/// Servo board configuration
pub const PCA9685: Pca9685Config = Pca9685Config {
    address: SERVO_I2C_ADDRESS,
    frequency_hz: SERVO_FREQUENCY_HZ,
    pulse: PulseRange {
        min_us: SERVO_MIN_PULSE_US,
        max_us: SERVO_MAX_PULSE_US,
        max_angle: SERVO_MAX_ANGLE,
    },
};

/// Slew rate of eased moves
pub const SLEW: SlewConfig = SlewConfig {
    degrees_per_update: SERVO_DEGREES_PER_UPDATE,
};

/// Servo task update period
pub const SERVO_UPDATE_MS: u32 = generated::SERVO_UPDATE_MS;

/// Overwrite the stored table with defaults at boot
pub const FORCE_REINIT: bool = cfg!(feature = "force-reinit");
