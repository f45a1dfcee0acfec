//! Board-agnostic core logic for the dual-position servo controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Channel table (two stored angles plus the active slot per channel)
//! - Persistent record format and startup validation
//! - Input monitor (tracks each channel's input level)
//! - Edit controller (four-button trim panel with accelerating repeat)
//! - Persistence scheduler (commits edits after a quiet period)
//! - Configuration type definitions
//!
//! Everything is driven from [`controller::Controller::tick`], which the
//! firmware calls once per control-loop period.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod edit;
pub mod input;
pub mod persist;
pub mod state;
pub mod table;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{Controller, StartError};
