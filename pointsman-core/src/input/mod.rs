//! Input handling
//!
//! Per-tick snapshots of channel levels and panel buttons, and the
//! monitor that makes each servo follow its channel's input.

pub mod monitor;
pub mod snapshot;

pub use monitor::InputMonitor;
pub use snapshot::{Button, ButtonPanel, ButtonState, ChannelLevels};
