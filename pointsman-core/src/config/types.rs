//! Configuration type definitions
//!
//! These types hold every tunable the controller exposes at its boundary:
//! channel count, angle limits, autosave quiet period, the button repeat
//! ramp and the persistent marker byte.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum channels per controller (one PCA9685 board)
pub const MAX_CHANNELS: usize = 16;

/// Marker byte written at offset 0 of an initialized store
pub const DEFAULT_MARKER: u8 = 0xA5;

/// Distance of the factory-default angles from the midpoint (degrees)
pub const DEFAULT_SPREAD_DEG: u8 = 40;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// At least one channel is required
    NoChannels,
    /// More channels than one servo board can address
    TooManyChannels,
    /// `min_pos` must be strictly below `max_pos`
    EmptyRange,
    /// Quiet period of zero would commit on every edit
    ZeroQuietPeriod,
    /// Repeat floor must be non-zero and not above the initial delay
    InvalidRepeatRamp,
    /// Marker equals an erased (0xFF) or zeroed (0x00) byte
    AmbiguousMarker,
}

/// Controller configuration
///
/// All times are milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    /// Number of input/servo channels in use (1..=16)
    pub channel_count: u8,
    /// Lowest angle a stored position may take
    pub min_pos: u8,
    /// Highest angle a stored position may take
    pub max_pos: u8,
    /// Idle time after the last change before the table is committed
    pub quiet_period_ms: u32,
    /// Delay before the first repeat of a held Increase/Decrease
    pub repeat_initial_ms: u32,
    /// Amount the repeat delay shrinks after every repeat
    pub repeat_step_ms: u32,
    /// Shortest repeat delay
    pub repeat_floor_ms: u32,
    /// NextChannel hold time that resets the cursor to channel 0
    pub long_hold_ms: u32,
    /// Marker byte proving the store holds a valid table
    pub marker: u8,
    /// Control loop period
    pub poll_interval_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ControllerConfig {
    /// Factory configuration: 8 channels, 0..180 degrees
    pub const DEFAULT: Self = Self {
        channel_count: 8,
        min_pos: 0,
        max_pos: 180,
        quiet_period_ms: 20_000,
        repeat_initial_ms: 200,
        repeat_step_ms: 10,
        repeat_floor_ms: 50,
        long_hold_ms: 2_000,
        marker: DEFAULT_MARKER,
        poll_interval_ms: 100,
    };

    /// Check the configuration against the controller's invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_count == 0 {
            return Err(ConfigError::NoChannels);
        }
        if self.channel_count as usize > MAX_CHANNELS {
            return Err(ConfigError::TooManyChannels);
        }
        if self.min_pos >= self.max_pos {
            return Err(ConfigError::EmptyRange);
        }
        if self.quiet_period_ms == 0 {
            return Err(ConfigError::ZeroQuietPeriod);
        }
        if self.repeat_floor_ms == 0 || self.repeat_floor_ms > self.repeat_initial_ms {
            return Err(ConfigError::InvalidRepeatRamp);
        }
        if self.marker == 0xFF || self.marker == 0x00 {
            return Err(ConfigError::AmbiguousMarker);
        }
        Ok(())
    }

    /// Number of channels as a `usize`
    pub fn channels(&self) -> usize {
        self.channel_count as usize
    }

    /// Center of the allowed angle range
    ///
    /// Computed as `min_pos + (max_pos - min_pos) / 2`, the middle of the
    /// range itself. This only equals `(max_pos - min_pos) / 2` when
    /// `min_pos` is 0; with a raised `min_pos` the plain half-span would
    /// sit below the range and push both defaults onto the clamp.
    pub fn midpoint(&self) -> u8 {
        self.min_pos + (self.max_pos - self.min_pos) / 2
    }

    /// Check that an angle lies inside `[min_pos, max_pos]`
    pub fn contains(&self, angle: u8) -> bool {
        (self.min_pos..=self.max_pos).contains(&angle)
    }

    /// Clamp a signed angle into `[min_pos, max_pos]`
    pub fn clamp(&self, angle: i16) -> u8 {
        angle.clamp(self.min_pos as i16, self.max_pos as i16) as u8
    }

    /// Factory default for the first stored position
    pub fn default_first(&self) -> u8 {
        self.clamp(self.midpoint() as i16 + DEFAULT_SPREAD_DEG as i16)
    }

    /// Factory default for the second stored position
    pub fn default_second(&self) -> u8 {
        self.clamp(self.midpoint() as i16 - DEFAULT_SPREAD_DEG as i16)
    }
}
