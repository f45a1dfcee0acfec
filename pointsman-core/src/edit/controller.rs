//! Edit controller
//!
//! Turns per-tick button snapshots into edits of the channel table:
//!
//! - Increase/Decrease trim the angle under the cursor, repeating with an
//!   accelerating rate while held. The servo follows immediately.
//! - NextSlot switches the cursor between the two stored angles and eases
//!   the servo there so the operator can preview it.
//! - NextChannel moves the cursor on release. A hold of `long_hold_ms` or
//!   more sends it back to channel 0 instead.
//!
//! Nothing here blocks: a held button only leaves a deadline behind and
//! the rest of the control loop keeps running.

use super::repeat::{Direction, Repeat};
use crate::config::ControllerConfig;
use crate::input::ButtonState;
use crate::state::{Context, Event, EventSink};
use crate::table::{ChannelTable, Slot};
use crate::traits::actuator::drive;
use crate::traits::{Actuator, Move};

/// Channel and slot being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EditCursor {
    channel: u8,
    slot: Slot,
}

impl EditCursor {
    /// Cursor on `channel`, showing the slot its input currently selects
    pub fn at(channel: u8, table: &ChannelTable) -> Self {
        Self {
            channel,
            slot: table.slot(channel).unwrap_or_default(),
        }
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }
}

/// Cursor transition applied when NextChannel is released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelStep {
    /// Short press: next channel, wrapping after the last
    Advance,
    /// Long hold: back to channel 0
    ForceReset,
}

impl ChannelStep {
    /// Transition for a button held for `held_ms`
    pub fn for_hold(held_ms: u32, config: &ControllerConfig) -> Self {
        if held_ms >= config.long_hold_ms {
            ChannelStep::ForceReset
        } else {
            ChannelStep::Advance
        }
    }

    /// Channel the cursor lands on, starting from `channel` of `count`
    pub fn apply(self, channel: u8, count: u8) -> u8 {
        match self {
            ChannelStep::ForceReset => 0,
            ChannelStep::Advance if count == 0 => 0,
            ChannelStep::Advance => ((channel as u16 + 1) % count as u16) as u8,
        }
    }
}

/// NextChannel press tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChannelHold {
    Released,
    Held { since: u32, armed: bool },
}

/// Four-button edit state machine
#[derive(Debug, Clone)]
pub struct EditController {
    cursor: EditCursor,
    repeat: Option<Repeat>,
    channel_hold: ChannelHold,
    next_slot_held: bool,
}

impl EditController {
    /// Create a controller with the cursor on channel 0
    pub fn new(table: &ChannelTable) -> Self {
        Self {
            cursor: EditCursor::at(0, table),
            repeat: None,
            channel_hold: ChannelHold::Released,
            next_slot_held: false,
        }
    }

    pub fn cursor(&self) -> EditCursor {
        self.cursor
    }

    /// Check if Increase or Decrease is repeating
    pub fn is_repeating(&self) -> bool {
        self.repeat.is_some()
    }

    /// Check if a button gesture is still in progress
    ///
    /// True while Increase/Decrease repeats or NextChannel is down. A
    /// commit must not land in the middle of either.
    pub fn is_busy(&self) -> bool {
        self.repeat.is_some() || self.channel_hold != ChannelHold::Released
    }

    /// Put the cursor back on channel 0 after a commit
    pub(crate) fn reset_cursor(&mut self, table: &ChannelTable) {
        self.cursor = EditCursor::at(0, table);
    }

    /// Process one button snapshot
    ///
    /// Increase/Decrease take priority. While one of them is held,
    /// NextChannel and NextSlot are left untouched and picked up once the
    /// adjustment ends.
    pub fn tick<A: Actuator, E: EventSink>(
        &mut self,
        ctx: &mut Context,
        buttons: ButtonState,
        now_ms: u32,
        actuator: &mut A,
        events: &mut E,
    ) {
        if self.service_adjust(ctx, buttons, now_ms, actuator, events) {
            return;
        }

        self.service_next_channel(ctx, buttons.next_channel, now_ms, actuator, events);
        self.service_next_slot(ctx, buttons.next_slot, now_ms, actuator, events);
    }

    /// Returns `true` while an adjustment button is held
    fn service_adjust<A: Actuator, E: EventSink>(
        &mut self,
        ctx: &mut Context,
        buttons: ButtonState,
        now_ms: u32,
        actuator: &mut A,
        events: &mut E,
    ) -> bool {
        let direction = if buttons.increase {
            Direction::Increase
        } else if buttons.decrease {
            Direction::Decrease
        } else {
            self.repeat = None;
            return false;
        };

        match self.repeat.as_mut() {
            Some(repeat) if repeat.direction() == direction => {
                let steps = repeat.due_steps(now_ms, &ctx.config);
                for _ in 0..steps {
                    self.step(ctx, direction, now_ms, actuator, events);
                }
            }
            _ => {
                self.repeat = Some(Repeat::start(direction, now_ms, &ctx.config));
                self.step(ctx, direction, now_ms, actuator, events);
            }
        }

        true
    }

    fn step<A: Actuator, E: EventSink>(
        &mut self,
        ctx: &mut Context,
        direction: Direction,
        now_ms: u32,
        actuator: &mut A,
        events: &mut E,
    ) {
        let EditCursor { channel, slot } = self.cursor;
        let Some(angle) = ctx.table.adjust(channel, slot, direction.delta(), &ctx.config) else {
            return;
        };

        drive(actuator, events, Move::immediate(channel, angle));
        ctx.dirty.mark(now_ms);
        events.emit(Event::PositionAdjusted {
            channel,
            slot,
            angle,
        });
    }

    fn service_next_slot<A: Actuator, E: EventSink>(
        &mut self,
        ctx: &mut Context,
        pressed: bool,
        now_ms: u32,
        actuator: &mut A,
        events: &mut E,
    ) {
        let rising = pressed && !self.next_slot_held;
        self.next_slot_held = pressed;
        if !rising {
            return;
        }

        let channel = self.cursor.channel;
        let slot = self.cursor.slot.toggle();
        self.cursor.slot = slot;

        if let Some(angle) = ctx.table.position(channel, slot) {
            drive(actuator, events, Move::eased(channel, angle));
            ctx.dirty.mark(now_ms);
            events.emit(Event::SlotSelected {
                channel,
                slot,
                angle,
            });
        }
    }

    fn service_next_channel<A: Actuator, E: EventSink>(
        &mut self,
        ctx: &mut Context,
        pressed: bool,
        now_ms: u32,
        actuator: &mut A,
        events: &mut E,
    ) {
        match (self.channel_hold, pressed) {
            (ChannelHold::Released, false) => {}
            (ChannelHold::Released, true) => {
                // Undo any preview on the channel being left
                let channel = self.cursor.channel;
                if let Some(angle) = ctx.table.active_position(channel) {
                    drive(actuator, events, Move::eased(channel, angle));
                }
                self.channel_hold = ChannelHold::Held {
                    since: now_ms,
                    armed: false,
                };
            }
            (ChannelHold::Held { since, armed }, true) => {
                if !armed && now_ms.wrapping_sub(since) >= ctx.config.long_hold_ms {
                    self.channel_hold = ChannelHold::Held { since, armed: true };
                    events.emit(Event::ChannelResetArmed);
                }
            }
            (ChannelHold::Held { since, .. }, false) => {
                self.channel_hold = ChannelHold::Released;

                let step = ChannelStep::for_hold(now_ms.wrapping_sub(since), &ctx.config);
                let channel = step.apply(self.cursor.channel, ctx.channel_count());
                self.cursor = EditCursor::at(channel, &ctx.table);

                if let Some(angle) = ctx.table.active_position(channel) {
                    drive(actuator, events, Move::eased(channel, angle));
                }
                events.emit(Event::ChannelSelected { channel, step });
            }
        }
    }
}
