//! Runtime state
//!
//! The owned context every component operates on, and the events the core
//! emits for diagnostics.

pub mod context;
pub mod events;

pub use context::{Context, DirtyMarker};
pub use events::{Event, EventSink};
