//! Input snapshots
//!
//! The control loop samples all pins once per tick and hands the core
//! plain values, so the core never touches hardware and tests can feed it
//! any sequence they like.

use pointsman_hal::{ActiveLow, InputPin};

use crate::config::MAX_CHANNELS;

/// Input levels of all channels, one bit per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelLevels(u16);

impl ChannelLevels {
    /// All channels low
    pub const fn new() -> Self {
        Self(0)
    }

    /// Levels from a bitmask (bit n = channel n)
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Raw bitmask
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Level of one channel (channels past the end read low)
    pub fn get(&self, channel: u8) -> bool {
        (channel as usize) < MAX_CHANNELS && self.0 & (1 << channel) != 0
    }

    /// Set the level of one channel
    pub fn set(&mut self, channel: u8, high: bool) {
        if (channel as usize) >= MAX_CHANNELS {
            return;
        }
        if high {
            self.0 |= 1 << channel;
        } else {
            self.0 &= !(1 << channel);
        }
    }

    /// Builder form of [`ChannelLevels::set`]
    pub fn with(mut self, channel: u8, high: bool) -> Self {
        self.set(channel, high);
        self
    }

    /// Sample a bank of input pins, pin n feeding channel n
    pub fn sample<P: InputPin>(pins: &[P]) -> Self {
        let mut levels = Self::new();
        for (i, pin) in pins.iter().take(MAX_CHANNELS).enumerate() {
            levels.set(i as u8, pin.is_high());
        }
        levels
    }
}

/// Panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Select the next channel (long hold: back to channel 0)
    NextChannel,
    /// Switch between the two stored positions
    NextSlot,
    /// Raise the selected angle
    Increase,
    /// Lower the selected angle
    Decrease,
}

/// Pressed state of all four buttons at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    pub next_channel: bool,
    pub next_slot: bool,
    pub increase: bool,
    pub decrease: bool,
}

impl ButtonState {
    /// Nothing pressed
    pub const RELEASED: Self = Self {
        next_channel: false,
        next_slot: false,
        increase: false,
        decrease: false,
    };

    /// Only `button` pressed
    pub fn only(button: Button) -> Self {
        Self::RELEASED.with(button)
    }

    /// Copy with `button` pressed
    pub fn with(mut self, button: Button) -> Self {
        match button {
            Button::NextChannel => self.next_channel = true,
            Button::NextSlot => self.next_slot = true,
            Button::Increase => self.increase = true,
            Button::Decrease => self.decrease = true,
        }
        self
    }

    /// Check if `button` is pressed
    pub fn is_pressed(&self, button: Button) -> bool {
        match button {
            Button::NextChannel => self.next_channel,
            Button::NextSlot => self.next_slot,
            Button::Increase => self.increase,
            Button::Decrease => self.decrease,
        }
    }
}

/// The four panel buttons, wired active-low
pub struct ButtonPanel<P> {
    next_channel: ActiveLow<P>,
    next_slot: ActiveLow<P>,
    increase: ActiveLow<P>,
    decrease: ActiveLow<P>,
}

impl<P: InputPin> ButtonPanel<P> {
    /// Create a panel from its four pins
    pub fn new(next_channel: P, next_slot: P, increase: P, decrease: P) -> Self {
        Self {
            next_channel: ActiveLow::new(next_channel),
            next_slot: ActiveLow::new(next_slot),
            increase: ActiveLow::new(increase),
            decrease: ActiveLow::new(decrease),
        }
    }

    /// Sample all buttons
    pub fn sample(&self) -> ButtonState {
        ButtonState {
            next_channel: self.next_channel.is_pressed(),
            next_slot: self.next_slot.is_pressed(),
            increase: self.increase.is_pressed(),
            decrease: self.decrease.is_pressed(),
        }
    }
}
