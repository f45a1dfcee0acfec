//! Channel table
//!
//! The authoritative, in-memory data model: two stored angles per channel
//! plus the slot the channel's input currently selects.

pub mod channel;
pub mod channel_table;

pub use channel::{Channel, Slot};
pub use channel_table::ChannelTable;
