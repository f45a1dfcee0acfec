//! Input monitor
//!
//! Each tick, compares every channel's live input level with the slot the
//! table records for it. On a mismatch the slot flips, the servo eases to
//! the newly selected angle and the change is marked for persistence.

use super::snapshot::ChannelLevels;
use crate::state::{Context, Event, EventSink};
use crate::table::Slot;
use crate::traits::actuator::drive;
use crate::traits::{Actuator, Move};

/// Makes each servo follow its channel's input level
#[derive(Debug, Default)]
pub struct InputMonitor;

impl InputMonitor {
    /// Create a new input monitor
    pub fn new() -> Self {
        Self
    }

    /// Process one snapshot of input levels
    ///
    /// Never blocks and never touches the store. Returns the number of
    /// channels that changed slot.
    pub fn tick<A: Actuator, E: EventSink>(
        &mut self,
        ctx: &mut Context,
        levels: ChannelLevels,
        now_ms: u32,
        actuator: &mut A,
        events: &mut E,
    ) -> u8 {
        let mut changed = 0;

        for channel in 0..ctx.channel_count() {
            let wanted = Slot::from_level(levels.get(channel));
            if ctx.table.slot(channel) == Some(wanted) {
                continue;
            }

            let Some(slot) = ctx.table.toggle_slot(channel) else {
                continue;
            };
            let Some(angle) = ctx.table.position(channel, slot) else {
                continue;
            };

            drive(actuator, events, Move::eased(channel, angle));
            ctx.dirty.mark(now_ms);
            events.emit(Event::InputChanged {
                channel,
                slot,
                angle,
            });
            changed += 1;
        }

        changed
    }
}
