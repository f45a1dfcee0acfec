//! Pointsman Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. The controller core and the servo drivers only
//! ever talk to these traits, so the same logic runs on the RP2040 board
//! and in host-side tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  pointsman-core / pointsman-drivers     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pointsman-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!          ┌──────────────────────┐
//!          │ pointsman-hal-rp2040 │
//!          └──────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital inputs (channel levels, panel buttons)
//! - [`i2c::I2cBus`] - I2C bus operations (servo PWM board)
//! - [`store::PersistentStore`] - Byte-addressable persistent storage

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod store;

// Re-export key traits at crate root for convenience
pub use gpio::{ActiveLow, InputPin};
pub use i2c::{I2cBus, I2cConfig};
pub use store::{PersistentStore, StoreError};
