//! Digital inputs
//!
//! Channel inputs are plain levels. Panel buttons use the internal pull-up
//! and switch to ground; `pointsman_hal::ActiveLow` turns that into a
//! pressed state further up.

use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_rp::Peri;
use pointsman_hal::InputPin;

/// RP2040 input pin
pub struct RpInput<'d> {
    input: Input<'d>,
}

impl<'d> RpInput<'d> {
    /// Input with an explicit pull
    pub fn new(pin: Peri<'d, impl Pin>, pull: Pull) -> Self {
        Self {
            input: Input::new(pin, pull),
        }
    }

    /// Channel input, pulled down so an open input selects the first slot
    pub fn pulled_down(pin: Peri<'d, impl Pin>) -> Self {
        Self::new(pin, Pull::Down)
    }

    /// Button input, pulled up for a switch to ground
    pub fn pulled_up(pin: Peri<'d, impl Pin>) -> Self {
        Self::new(pin, Pull::Up)
    }
}

impl InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}
