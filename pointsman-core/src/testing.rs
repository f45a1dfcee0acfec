//! Test doubles shared by the unit tests

use pointsman_hal::store::check_bounds;
use pointsman_hal::{PersistentStore, StoreError};

use crate::state::{Event, EventSink};
use crate::traits::{Actuator, ActuatorError, Move};

/// RAM-backed store that counts writes
pub struct MemoryStore {
    pub bytes: Vec<u8>,
    pub writes: usize,
    pub last_write: Option<(usize, usize)>,
    pub fail_writes: bool,
}

impl MemoryStore {
    /// Store that reads back 0xFF everywhere, like erased flash
    pub fn erased(capacity: usize) -> Self {
        Self {
            bytes: vec![0xFF; capacity],
            writes: 0,
            last_write: None,
            fail_writes: false,
        }
    }
}

impl PersistentStore for MemoryStore {
    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), StoreError> {
        check_bounds(self.capacity(), offset, buffer.len())?;
        buffer.copy_from_slice(&self.bytes[offset..offset + buffer.len()]);
        Ok(())
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Io);
        }
        check_bounds(self.capacity(), offset, data.len())?;
        self.bytes[offset..offset + data.len()].copy_from_slice(data);
        self.writes += 1;
        self.last_write = Some((offset, data.len()));
        Ok(())
    }
}

/// Actuator that records every accepted command
#[derive(Default)]
pub struct RecordingActuator {
    pub moves: Vec<Move>,
    pub refuse: bool,
}

impl RecordingActuator {
    pub fn take(&mut self) -> Vec<Move> {
        core::mem::take(&mut self.moves)
    }
}

impl Actuator for RecordingActuator {
    fn move_eased(&mut self, channel: u8, angle: u8) -> Result<(), ActuatorError> {
        if self.refuse {
            return Err(ActuatorError::QueueFull);
        }
        self.moves.push(Move::eased(channel, angle));
        Ok(())
    }

    fn move_immediate(&mut self, channel: u8, angle: u8) -> Result<(), ActuatorError> {
        if self.refuse {
            return Err(ActuatorError::QueueFull);
        }
        self.moves.push(Move::immediate(channel, angle));
        Ok(())
    }
}

/// Sink that keeps every event
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<Event>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}
