//! Persistent record layout
//!
//! ```text
//! offset 0          marker byte
//! offset 1          first[0..N]    first stored angle per channel
//! offset 1 + N      second[0..N]   second stored angle per channel
//! offset 1 + 2N     slot[0..N]     0 = first, 1 = second
//! ```
//!
//! The whole record is written in one store call; partial records are
//! never produced.

use heapless::Vec;

use crate::config::{ControllerConfig, MAX_CHANNELS};
use crate::table::{Channel, ChannelTable, Slot};

/// Offset of the marker byte
pub const MARKER_OFFSET: usize = 0;

/// Offset of the first table array
pub const TABLE_OFFSET: usize = 1;

/// Bytes per channel (first, second, slot)
pub const BYTES_PER_CHANNEL: usize = 3;

/// Largest record the controller can produce
pub const MAX_RECORD_LEN: usize = record_len(MAX_CHANNELS);

/// Record length for a given channel count
pub const fn record_len(channels: usize) -> usize {
    TABLE_OFFSET + BYTES_PER_CHANNEL * channels
}

/// Errors decoding a record payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Fewer bytes than the configured channel count needs
    Truncated,
    /// Stored angle outside the configured range
    PositionOutOfRange { channel: u8 },
    /// Slot byte other than 0 or 1
    InvalidSlot { channel: u8 },
}

/// Serialize a table (and marker) into `out`
///
/// Returns the number of bytes used.
pub fn encode(table: &ChannelTable, marker: u8, out: &mut [u8; MAX_RECORD_LEN]) -> usize {
    let n = table.len();
    out[MARKER_OFFSET] = marker;

    for (i, channel) in table.iter().enumerate() {
        out[TABLE_OFFSET + i] = channel.position(Slot::First);
        out[TABLE_OFFSET + n + i] = channel.position(Slot::Second);
        out[TABLE_OFFSET + 2 * n + i] = channel.slot().as_u8();
    }

    record_len(n)
}

/// Deserialize the table arrays (everything after the marker)
///
/// Rejects any payload that would break the table invariant.
pub fn decode(payload: &[u8], config: &ControllerConfig) -> Result<ChannelTable, RecordError> {
    let n = config.channels();
    if n > MAX_CHANNELS || payload.len() < BYTES_PER_CHANNEL * n {
        return Err(RecordError::Truncated);
    }

    let (firsts, rest) = payload.split_at(n);
    let (seconds, rest) = rest.split_at(n);
    let slots = &rest[..n];

    let mut channels: Vec<Channel, MAX_CHANNELS> = Vec::new();
    for i in 0..n {
        let channel = i as u8;
        let (first, second) = (firsts[i], seconds[i]);
        if !config.contains(first) || !config.contains(second) {
            return Err(RecordError::PositionOutOfRange { channel });
        }
        let slot = Slot::from_u8(slots[i]).ok_or(RecordError::InvalidSlot { channel })?;
        let _ = channels.push(Channel::new(first, second, slot));
    }

    Ok(ChannelTable::from_channels(channels))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(channels: u8) -> ControllerConfig {
        ControllerConfig {
            channel_count: channels,
            ..ControllerConfig::default()
        }
    }

    #[test]
    fn test_record_len() {
        assert_eq!(record_len(8), 25);
        assert_eq!(MAX_RECORD_LEN, 49);
    }

    #[test]
    fn test_encode_layout() {
        let config = config(3);
        let mut table = ChannelTable::with_defaults(&config);
        table.set_position(1, Slot::First, 155, &config);
        table.toggle_slot(2);

        let mut buf = [0u8; MAX_RECORD_LEN];
        let len = encode(&table, 0xA5, &mut buf);

        assert_eq!(len, 10);
        assert_eq!(
            &buf[..len],
            &[0xA5, 130, 155, 130, 50, 50, 50, 0, 0, 1]
        );
    }

    #[test]
    fn test_decode_matches_encode() {
        let config = config(4);
        let mut table = ChannelTable::with_defaults(&config);
        table.set_position(0, Slot::Second, 12, &config);
        table.toggle_slot(3);

        let mut buf = [0u8; MAX_RECORD_LEN];
        let len = encode(&table, 0xA5, &mut buf);
        let decoded = decode(&buf[TABLE_OFFSET..len], &config).unwrap();

        assert_eq!(decoded, table);
    }

    #[test]
    fn test_decode_rejects_truncated() {
        let config = config(4);
        assert_eq!(decode(&[0; 11], &config), Err(RecordError::Truncated));
    }

    #[test]
    fn test_decode_rejects_out_of_range() {
        let config = config(2);
        // Erased flash reads back as 0xFF everywhere
        let payload = [90, 0xFF, 90, 90, 0, 0];
        assert_eq!(
            decode(&payload, &config),
            Err(RecordError::PositionOutOfRange { channel: 1 })
        );
    }

    #[test]
    fn test_decode_rejects_bad_slot() {
        let config = config(2);
        let payload = [90, 90, 90, 90, 0, 7];
        assert_eq!(
            decode(&payload, &config),
            Err(RecordError::InvalidSlot { channel: 1 })
        );
    }
}
