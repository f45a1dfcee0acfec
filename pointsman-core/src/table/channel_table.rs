//! The channel table
//!
//! Fixed-capacity table of channels. Every mutation goes through a method
//! that keeps angles inside the configured range, so the invariant holds
//! for the table's whole life.

use heapless::Vec;

use super::channel::{Channel, Slot};
use crate::config::{ControllerConfig, MAX_CHANNELS};

/// In-memory table of all channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTable {
    channels: Vec<Channel, MAX_CHANNELS>,
}

impl ChannelTable {
    /// Create a table filled with factory defaults
    pub fn with_defaults(config: &ControllerConfig) -> Self {
        let mut table = Self {
            channels: Vec::new(),
        };
        table.initialize_defaults(config);
        table
    }

    /// Reset every channel to factory defaults
    ///
    /// First position = midpoint + 40, second = midpoint - 40 (clamped to
    /// the range), slot = first.
    pub fn initialize_defaults(&mut self, config: &ControllerConfig) {
        let default = Channel::new(config.default_first(), config.default_second(), Slot::First);
        self.channels.clear();
        for _ in 0..config.channels().min(MAX_CHANNELS) {
            let _ = self.channels.push(default);
        }
    }

    /// Build a table from decoded channels
    pub(crate) fn from_channels(channels: Vec<Channel, MAX_CHANNELS>) -> Self {
        Self { channels }
    }

    /// Number of channels
    pub(crate) fn len(&self) -> usize {
        self.channels.len()
    }

    /// Get a channel by index
    pub fn get(&self, channel: u8) -> Option<&Channel> {
        self.channels.get(channel as usize)
    }

    /// Iterate channels in index order
    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter()
    }

    /// Angle stored for a channel's slot
    pub fn position(&self, channel: u8, slot: Slot) -> Option<u8> {
        self.get(channel).map(|c| c.position(slot))
    }

    /// Angle of a channel's currently selected slot
    pub fn active_position(&self, channel: u8) -> Option<u8> {
        self.get(channel).map(Channel::active_position)
    }

    /// Slot a channel's input currently selects
    pub fn slot(&self, channel: u8) -> Option<Slot> {
        self.get(channel).map(Channel::slot)
    }

    /// Store an angle, clamped to the configured range
    ///
    /// Returns the angle actually stored.
    pub fn set_position(
        &mut self,
        channel: u8,
        slot: Slot,
        angle: u8,
        config: &ControllerConfig,
    ) -> Option<u8> {
        let angle = config.clamp(angle as i16);
        let entry = self.channels.get_mut(channel as usize)?;
        entry.set_position(slot, angle);
        Some(angle)
    }

    /// Move a stored angle by `delta` degrees, clamped to the range
    ///
    /// Returns the angle actually stored.
    pub fn adjust(
        &mut self,
        channel: u8,
        slot: Slot,
        delta: i16,
        config: &ControllerConfig,
    ) -> Option<u8> {
        let entry = self.channels.get_mut(channel as usize)?;
        let angle = config.clamp(entry.position(slot) as i16 + delta);
        entry.set_position(slot, angle);
        Some(angle)
    }

    /// Flip a channel's slot, returning the new slot
    pub fn toggle_slot(&mut self, channel: u8) -> Option<Slot> {
        let entry = self.channels.get_mut(channel as usize)?;
        let slot = entry.slot().toggle();
        entry.set_slot(slot);
        Some(slot)
    }

    /// Check every channel against the configured range
    pub fn is_valid(&self, config: &ControllerConfig) -> bool {
        self.len() == config.channels()
            && self
                .iter()
                .all(|c| config.contains(c.position(Slot::First)) && config.contains(c.position(Slot::Second)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::default();
        let table = ChannelTable::with_defaults(&config);

        assert_eq!(table.len(), 8);
        for channel in table.iter() {
            assert_eq!(channel.position(Slot::First), 130);
            assert_eq!(channel.position(Slot::Second), 50);
            assert_eq!(channel.slot(), Slot::First);
        }
        assert!(table.is_valid(&config));
    }

    #[test]
    fn test_initialize_defaults_resets_edits() {
        let config = ControllerConfig::default();
        let mut table = ChannelTable::with_defaults(&config);
        table.set_position(2, Slot::Second, 10, &config);
        table.toggle_slot(2);

        table.initialize_defaults(&config);
        assert_eq!(table, ChannelTable::with_defaults(&config));
    }

    #[test]
    fn test_adjust_clamps() {
        let config = ControllerConfig::default();
        let mut table = ChannelTable::with_defaults(&config);

        assert_eq!(table.adjust(0, Slot::First, 60, &config), Some(180));
        assert_eq!(table.adjust(0, Slot::Second, -60, &config), Some(0));
        assert_eq!(table.adjust(0, Slot::First, -1, &config), Some(179));
    }

    #[test]
    fn test_out_of_range_channel() {
        let config = ControllerConfig::default();
        let mut table = ChannelTable::with_defaults(&config);

        assert!(table.get(8).is_none());
        assert_eq!(table.adjust(8, Slot::First, 1, &config), None);
        assert_eq!(table.toggle_slot(8), None);
    }

    #[test]
    fn test_toggle_slot() {
        let config = ControllerConfig::default();
        let mut table = ChannelTable::with_defaults(&config);

        assert_eq!(table.toggle_slot(3), Some(Slot::Second));
        assert_eq!(table.active_position(3), Some(50));
        assert_eq!(table.toggle_slot(3), Some(Slot::First));
        assert_eq!(table.active_position(3), Some(130));
    }

    proptest! {
        #[test]
        fn prop_adjust_stays_in_range(
            min in 0u8..90,
            span in 1u8..90,
            deltas in proptest::collection::vec(-3i16..=3, 0..400),
        ) {
            let config = ControllerConfig {
                min_pos: min,
                max_pos: min + span,
                ..ControllerConfig::default()
            };
            let mut table = ChannelTable::with_defaults(&config);
            for delta in deltas {
                let angle = table.adjust(1, Slot::First, delta, &config).unwrap();
                prop_assert!(config.contains(angle));
            }
            prop_assert!(table.is_valid(&config));
        }
    }
}
