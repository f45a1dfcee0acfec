//! Controller context
//!
//! Everything the components share lives in one owned [`Context`] that
//! the controller threads through each component by reference.

use crate::config::ControllerConfig;
use crate::table::ChannelTable;

/// Tracks the time of the last uncommitted change
///
/// `None` means nothing is pending. Timestamps are milliseconds since boot
/// and are compared with wrapping arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DirtyMarker(Option<u32>);

impl DirtyMarker {
    /// No pending change
    pub const fn clean() -> Self {
        Self(None)
    }

    /// Record a change at `now`
    pub fn mark(&mut self, now_ms: u32) {
        self.0 = Some(now_ms);
    }

    /// Forget the pending change
    pub fn clear(&mut self) {
        self.0 = None;
    }

    /// Time of the last change, if one is pending
    pub fn since(&self) -> Option<u32> {
        self.0
    }

    /// Check if a change is pending
    pub fn is_dirty(&self) -> bool {
        self.0.is_some()
    }

    /// Check if a pending change has been left alone for `quiet_ms`
    pub fn is_quiet(&self, now_ms: u32, quiet_ms: u32) -> bool {
        match self.0 {
            Some(t) => now_ms.wrapping_sub(t) >= quiet_ms,
            None => false,
        }
    }
}

/// Shared controller state
#[derive(Debug, Clone)]
pub struct Context {
    /// Active configuration
    pub config: ControllerConfig,
    /// Live channel table
    pub table: ChannelTable,
    /// Pending-change marker
    pub dirty: DirtyMarker,
}

impl Context {
    /// Create a context with nothing pending
    pub fn new(config: ControllerConfig, table: ChannelTable) -> Self {
        Self {
            config,
            table,
            dirty: DirtyMarker::clean(),
        }
    }

    /// Number of channels as a `u8`
    pub fn channel_count(&self) -> u8 {
        self.table.len() as u8
    }
}
