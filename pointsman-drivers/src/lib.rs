//! Hardware driver implementations
//!
//! This crate provides the servo side of the controller:
//!
//! - PCA9685 16-channel PWM board over I2C
//! - Servo bank that turns eased moves into a constant-rate slew

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod servo;
