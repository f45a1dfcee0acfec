//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use pointsman_core::traits::Move;

/// Channel capacity for servo commands
///
/// A commit resyncs every channel at once, so this holds a full board's
/// worth of moves with room to spare.
const SERVO_CHANNEL_SIZE: usize = 32;

/// Servo commands from the control task to the servo task
pub static SERVO_CMD: Channel<CriticalSectionRawMutex, Move, SERVO_CHANNEL_SIZE> = Channel::new();
