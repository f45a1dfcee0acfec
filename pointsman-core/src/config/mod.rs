//! Configuration types
//!
//! Board-agnostic controller configuration. The firmware fills this from
//! constants generated at build time; tests use the defaults.

pub mod types;

pub use types::*;
