//! Servo drivers
//!
//! The board driver only knows pulse widths. The bank sits in front of it
//! and decides which angle each output should show on every update.

pub mod bank;
pub mod pca9685;

pub use bank::{ServoBank, SlewConfig};
pub use pca9685::{DriverError, Pca9685, Pca9685Config, PulseRange};
