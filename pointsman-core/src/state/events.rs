//! Diagnostic events
//!
//! The core reports what it does through an [`EventSink`]. Nothing in the
//! core depends on the sink; the firmware logs events with defmt, tests
//! record them.

use crate::edit::ChannelStep;
use crate::persist::{PersistError, ReinitReason};
use crate::table::Slot;
use crate::traits::ActuatorError;

/// Events emitted by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Store was rewritten with factory defaults at startup
    StoreInitialized(ReinitReason),
    /// Existing table loaded at startup
    TableLoaded { channels: u8 },

    /// A channel's input changed level and its servo is moving
    InputChanged { channel: u8, slot: Slot, angle: u8 },

    /// Increase/Decrease changed a stored angle
    PositionAdjusted { channel: u8, slot: Slot, angle: u8 },
    /// NextSlot switched the edited slot
    SlotSelected { channel: u8, slot: Slot, angle: u8 },
    /// NextChannel was held long enough to reset to channel 0 on release
    ChannelResetArmed,
    /// NextChannel released
    ChannelSelected { channel: u8, step: ChannelStep },

    /// Table committed to the store
    Committed,
    /// Commit failed; it will be retried after another quiet period
    CommitFailed(PersistError),

    /// An actuator command could not be issued
    ActuatorFault { channel: u8, error: ActuatorError },
}

/// Receiver for core events
pub trait EventSink {
    /// Handle one event
    fn emit(&mut self, event: Event);
}

/// Discards every event
impl EventSink for () {
    fn emit(&mut self, _event: Event) {}
}
