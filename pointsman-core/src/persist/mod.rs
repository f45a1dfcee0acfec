//! Table persistence
//!
//! Startup validation, whole-table load/save against a
//! [`PersistentStore`], and the scheduler that defers commits until the
//! operator has stopped editing.

pub mod record;
pub mod scheduler;

use pointsman_hal::{PersistentStore, StoreError};

use crate::config::ControllerConfig;
use crate::table::ChannelTable;
use record::{RecordError, MARKER_OFFSET, MAX_RECORD_LEN, TABLE_OFFSET};

pub use scheduler::PersistenceScheduler;

/// Persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError {
    /// Store operation failed
    Store(StoreError),
    /// Stored payload violates the table invariant
    Record(RecordError),
    /// Store is smaller than the record
    StoreTooSmall,
}

impl From<StoreError> for PersistError {
    fn from(e: StoreError) -> Self {
        PersistError::Store(e)
    }
}

impl From<RecordError> for PersistError {
    fn from(e: RecordError) -> Self {
        PersistError::Record(e)
    }
}

/// Why the store was rewritten with defaults at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReinitReason {
    /// Forced by the build-time reinit flag
    Forced,
    /// Marker byte absent or wrong
    MarkerMismatch,
    /// Marker valid but the payload broke the table invariant
    InvalidPayload(RecordError),
}

/// Result of opening the store at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootOutcome {
    /// Existing table loaded
    Loaded,
    /// Store reinitialized with defaults
    Initialized(ReinitReason),
}

/// Check the marker byte
///
/// Returns `false` when the store has never been initialized (or was
/// initialized with a different marker).
pub fn validate_marker<S: PersistentStore>(
    store: &mut S,
    config: &ControllerConfig,
) -> Result<bool, StoreError> {
    Ok(store.read_byte(MARKER_OFFSET)? == config.marker)
}

/// Read the whole table from the store
///
/// Does not check the marker; callers validate it first.
pub fn load_from<S: PersistentStore>(
    store: &mut S,
    config: &ControllerConfig,
) -> Result<ChannelTable, PersistError> {
    let len = record::record_len(config.channels());
    if len > MAX_RECORD_LEN || store.capacity() < len {
        return Err(PersistError::StoreTooSmall);
    }

    let mut buffer = [0u8; MAX_RECORD_LEN];
    store.read(0, &mut buffer[..len])?;

    Ok(record::decode(&buffer[TABLE_OFFSET..len], config)?)
}

/// Replace the stored record with `table`
///
/// Marker and table go out in a single write.
pub fn save_to<S: PersistentStore>(
    store: &mut S,
    table: &ChannelTable,
    marker: u8,
) -> Result<(), PersistError> {
    let mut buffer = [0u8; MAX_RECORD_LEN];
    let len = record::encode(table, marker, &mut buffer);
    if store.capacity() < len {
        return Err(PersistError::StoreTooSmall);
    }

    store.write(0, &buffer[..len])?;
    Ok(())
}

/// Startup lifecycle: validate, reinitialize if needed, load
///
/// A missing or wrong marker (or `force_reinit`) writes factory defaults
/// before anything is loaded. A valid marker with an invalid payload is
/// treated the same way. The returned table is always read back from the
/// store, so a store that silently drops writes fails here.
pub fn open<S: PersistentStore>(
    store: &mut S,
    config: &ControllerConfig,
    force_reinit: bool,
) -> Result<(ChannelTable, BootOutcome), PersistError> {
    let reason = if force_reinit {
        ReinitReason::Forced
    } else if !validate_marker(store, config)? {
        ReinitReason::MarkerMismatch
    } else {
        match load_from(store, config) {
            Ok(table) => return Ok((table, BootOutcome::Loaded)),
            Err(PersistError::Record(e)) => ReinitReason::InvalidPayload(e),
            Err(e) => return Err(e),
        }
    };

    save_to(store, &ChannelTable::with_defaults(config), config.marker)?;
    if !validate_marker(store, config)? {
        return Err(PersistError::Store(StoreError::Corrupted));
    }
    let table = load_from(store, config)?;

    Ok((table, BootOutcome::Initialized(reason)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Slot;
    use crate::testing::MemoryStore;

    #[test]
    fn test_blank_store_is_initialized() {
        let config = ControllerConfig::default();
        let mut store = MemoryStore::erased(64);

        assert_eq!(validate_marker(&mut store, &config), Ok(false));

        let (table, outcome) = open(&mut store, &config, false).unwrap();
        assert_eq!(
            outcome,
            BootOutcome::Initialized(ReinitReason::MarkerMismatch)
        );
        assert_eq!(table, ChannelTable::with_defaults(&config));
        assert_eq!(validate_marker(&mut store, &config), Ok(true));
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_existing_table_is_loaded() {
        let config = ControllerConfig::default();
        let mut store = MemoryStore::erased(64);
        let mut table = ChannelTable::with_defaults(&config);
        table.set_position(3, Slot::First, 155, &config);
        table.toggle_slot(5);
        save_to(&mut store, &table, config.marker).unwrap();

        let (loaded, outcome) = open(&mut store, &config, false).unwrap();
        assert_eq!(outcome, BootOutcome::Loaded);
        assert_eq!(loaded, table);
        // No extra write on a clean boot
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_force_reinit_overwrites_valid_table() {
        let config = ControllerConfig::default();
        let mut store = MemoryStore::erased(64);
        let mut table = ChannelTable::with_defaults(&config);
        table.set_position(0, Slot::First, 10, &config);
        save_to(&mut store, &table, config.marker).unwrap();

        let (loaded, outcome) = open(&mut store, &config, true).unwrap();
        assert_eq!(outcome, BootOutcome::Initialized(ReinitReason::Forced));
        assert_eq!(loaded, ChannelTable::with_defaults(&config));
    }

    #[test]
    fn test_valid_marker_bad_payload_is_initialized() {
        let config = ControllerConfig::default();
        let mut store = MemoryStore::erased(64);
        // Marker written, table area still erased (0xFF)
        store.write(0, &[config.marker]).unwrap();

        let (table, outcome) = open(&mut store, &config, false).unwrap();
        assert_eq!(
            outcome,
            BootOutcome::Initialized(ReinitReason::InvalidPayload(
                RecordError::PositionOutOfRange { channel: 0 }
            ))
        );
        assert_eq!(table, ChannelTable::with_defaults(&config));
    }

    #[test]
    fn test_save_is_single_write_of_whole_record() {
        let config = ControllerConfig::default();
        let mut store = MemoryStore::erased(64);
        let table = ChannelTable::with_defaults(&config);

        save_to(&mut store, &table, config.marker).unwrap();

        assert_eq!(store.writes, 1);
        assert_eq!(store.last_write, Some((0, 25)));
        assert_eq!(store.bytes[0], 0xA5);
        assert_eq!(&store.bytes[1..9], &[130; 8]);
        assert_eq!(&store.bytes[9..17], &[50; 8]);
        assert_eq!(&store.bytes[17..25], &[0; 8]);
    }

    #[test]
    fn test_store_too_small() {
        let config = ControllerConfig::default();
        let mut store = MemoryStore::erased(10);
        let table = ChannelTable::with_defaults(&config);

        assert_eq!(
            save_to(&mut store, &table, config.marker),
            Err(PersistError::StoreTooSmall)
        );
    }

    #[test]
    fn test_write_failure_propagates() {
        let config = ControllerConfig::default();
        let mut store = MemoryStore::erased(64);
        store.fail_writes = true;

        assert_eq!(
            open(&mut store, &config, false),
            Err(PersistError::Store(StoreError::Io))
        );
    }
}
