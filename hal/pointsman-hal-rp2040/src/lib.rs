//! RP2040-specific HAL for the servo controller firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `pointsman-hal` traits:
//!
//! - Digital inputs (implements `pointsman_hal::InputPin`)
//! - Blocking I2C master (implements `pointsman_hal::I2cBus`)
//! - Flash-backed persistent store (implements `pointsman_hal::PersistentStore`)

#![no_std]

pub mod flash;
pub mod gpio;
pub mod i2c;

// Re-export shared traits from pointsman-hal for convenience
pub use pointsman_hal::{I2cBus, InputPin, PersistentStore, StoreError};
