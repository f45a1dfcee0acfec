//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod control;
pub mod servo;

pub use control::control_task;
pub use servo::{servo_task, ServoPwm};
