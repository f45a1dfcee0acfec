//! Controller-facing ends of the servo queue and the log
//!
//! The core talks to an `Actuator` and an `EventSink`. On the board the
//! actuator forwards commands to the servo task and the sink writes
//! events to the defmt log.

use defmt::*;

use pointsman_core::state::{Event, EventSink};
use pointsman_core::traits::{Actuator, ActuatorError, Move};
use pointsman_drivers::servo::pca9685::OUTPUTS;

use crate::channels::SERVO_CMD;

/// Sends every move to the servo task without waiting
pub struct QueueActuator;

impl QueueActuator {
    fn send(&mut self, cmd: Move) -> Result<(), ActuatorError> {
        if cmd.channel >= OUTPUTS {
            return Err(ActuatorError::InvalidChannel);
        }
        SERVO_CMD
            .try_send(cmd)
            .map_err(|_| ActuatorError::QueueFull)
    }
}

impl Actuator for QueueActuator {
    fn move_eased(&mut self, channel: u8, angle: u8) -> Result<(), ActuatorError> {
        self.send(Move::eased(channel, angle))
    }

    fn move_immediate(&mut self, channel: u8, angle: u8) -> Result<(), ActuatorError> {
        self.send(Move::immediate(channel, angle))
    }
}

/// Writes controller events to the defmt log
pub struct DefmtSink;

impl EventSink for DefmtSink {
    fn emit(&mut self, event: Event) {
        match event {
            Event::StoreInitialized(reason) => {
                warn!("Store initialized with defaults: {}", reason)
            }
            Event::TableLoaded { channels } => info!("Loaded table for {} channels", channels),
            Event::InputChanged {
                channel,
                slot,
                angle,
            } => info!("Input {} -> {} ({} deg)", channel, slot, angle),
            Event::PositionAdjusted {
                channel,
                slot,
                angle,
            } => debug!("Trim {} {} = {} deg", channel, slot, angle),
            Event::SlotSelected {
                channel,
                slot,
                angle,
            } => info!("Editing {} {} ({} deg)", channel, slot, angle),
            Event::ChannelResetArmed => info!("Release to return to channel 0"),
            Event::ChannelSelected { channel, step } => {
                info!("Editing channel {} ({})", channel, step)
            }
            Event::Committed => info!("Table saved to flash"),
            Event::CommitFailed(e) => warn!("Saving table failed: {}, will retry", e),
            Event::ActuatorFault { channel, error } => {
                warn!("Servo {} command dropped: {}", channel, error)
            }
        }
    }
}
