//! Edit panel
//!
//! Four buttons let the operator walk the channels, preview either stored
//! position and trim it a degree at a time.

pub mod controller;
pub mod repeat;

pub use controller::{ChannelStep, EditController, EditCursor};
pub use repeat::{Direction, Repeat};
