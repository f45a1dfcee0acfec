//! Per-channel data

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which of the two stored positions is meant
///
/// Stored as 0/1 in the persistent record. An input level of high selects
/// [`Slot::Second`], low selects [`Slot::First`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Slot {
    /// First stored position (indicator 0)
    #[default]
    First = 0,
    /// Second stored position (indicator 1)
    Second = 1,
}

impl Slot {
    /// The other slot
    pub const fn toggle(self) -> Self {
        match self {
            Slot::First => Slot::Second,
            Slot::Second => Slot::First,
        }
    }

    /// Slot selected by an input level
    pub const fn from_level(high: bool) -> Self {
        if high {
            Slot::Second
        } else {
            Slot::First
        }
    }

    /// Input level that selects this slot
    pub const fn as_level(self) -> bool {
        matches!(self, Slot::Second)
    }

    /// Persistent byte value
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a persistent byte value
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Slot::First),
            1 => Some(Slot::Second),
            _ => None,
        }
    }
}

/// One input/servo pair with its two programmable angles
///
/// Fields are private so that angles can only change through
/// [`super::ChannelTable`], which clamps them to the configured range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel {
    first: u8,
    second: u8,
    slot: Slot,
}

impl Channel {
    pub(crate) const fn new(first: u8, second: u8, slot: Slot) -> Self {
        Self {
            first,
            second,
            slot,
        }
    }

    /// Angle stored for a slot
    pub const fn position(&self, slot: Slot) -> u8 {
        match slot {
            Slot::First => self.first,
            Slot::Second => self.second,
        }
    }

    /// Slot the channel's input currently selects
    pub const fn slot(&self) -> Slot {
        self.slot
    }

    /// Angle of the currently selected slot
    pub const fn active_position(&self) -> u8 {
        self.position(self.slot)
    }

    pub(crate) fn set_position(&mut self, slot: Slot, angle: u8) {
        match slot {
            Slot::First => self.first = angle,
            Slot::Second => self.second = angle,
        }
    }

    pub(crate) fn set_slot(&mut self, slot: Slot) {
        self.slot = slot;
    }
}
