//! Servo actuator trait
//!
//! The core never drives a servo directly. It asks an [`Actuator`] for one
//! of two kinds of move and does not wait for the motion to finish.

use crate::state::{Event, EventSink};
use crate::table::ChannelTable;

/// Errors an actuator can report when accepting a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorError {
    /// Command queue to the servo task is full
    QueueFull,
    /// Bus transfer to the servo board failed
    Bus,
    /// No servo output for this channel
    InvalidChannel,
}

/// How a servo should reach its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Motion {
    /// Smooth, time-extended move
    Eased,
    /// Jump straight to the target (live trimming)
    Immediate,
}

/// A single servo command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Move {
    /// Channel (servo output) index
    pub channel: u8,
    /// Target angle in degrees
    pub angle: u8,
    /// Motion kind
    pub motion: Motion,
}

impl Move {
    /// Create an eased move
    pub const fn eased(channel: u8, angle: u8) -> Self {
        Self {
            channel,
            angle,
            motion: Motion::Eased,
        }
    }

    /// Create an immediate move
    pub const fn immediate(channel: u8, angle: u8) -> Self {
        Self {
            channel,
            angle,
            motion: Motion::Immediate,
        }
    }
}

/// Trait for servo outputs
///
/// Both calls are fire-and-forget: they return once the command has been
/// accepted, not when the servo arrives. Angles are always within the
/// configured range.
pub trait Actuator {
    /// Start a smooth move of `channel` to `angle`
    fn move_eased(&mut self, channel: u8, angle: u8) -> Result<(), ActuatorError>;

    /// Set `channel` to `angle` at once
    fn move_immediate(&mut self, channel: u8, angle: u8) -> Result<(), ActuatorError>;

    /// Issue a [`Move`]
    fn apply(&mut self, cmd: Move) -> Result<(), ActuatorError> {
        match cmd.motion {
            Motion::Eased => self.move_eased(cmd.channel, cmd.angle),
            Motion::Immediate => self.move_immediate(cmd.channel, cmd.angle),
        }
    }
}

/// Issue a move, reporting a refusal as an event
///
/// Actuator faults never stop the control loop.
pub(crate) fn drive<A: Actuator, E: EventSink>(actuator: &mut A, events: &mut E, cmd: Move) {
    if let Err(error) = actuator.apply(cmd) {
        events.emit(Event::ActuatorFault {
            channel: cmd.channel,
            error,
        });
    }
}

/// Ease every servo to its table-recorded slot position
pub(crate) fn resync_all<A: Actuator, E: EventSink>(
    table: &ChannelTable,
    actuator: &mut A,
    events: &mut E,
) {
    for (i, channel) in table.iter().enumerate() {
        drive(actuator, events, Move::eased(i as u8, channel.active_position()));
    }
}
