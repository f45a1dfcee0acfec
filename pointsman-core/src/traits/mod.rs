//! Hardware abstraction traits
//!
//! These traits define the interface between the controller logic
//! and the servo output.

pub mod actuator;

pub use actuator::{Actuator, ActuatorError, Motion, Move};
