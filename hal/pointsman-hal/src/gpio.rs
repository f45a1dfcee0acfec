//! GPIO pin abstractions
//!
//! Provides the digital input trait used to sample channel levels and
//! panel buttons. Implemented by chip-specific HALs.

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Active-low push button
///
/// Panel buttons pull the line to ground when pressed (internal pull-up,
/// switch to GND). This wrapper collapses that convention to a plain
/// `is_pressed()` so nothing above the HAL has to know about it.
pub struct ActiveLow<P> {
    pin: P,
}

impl<P: InputPin> ActiveLow<P> {
    /// Wrap an input pin wired as an active-low button
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Check if the button is currently held down
    pub fn is_pressed(&self) -> bool {
        self.pin.is_low()
    }

    /// Release the underlying pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> InputPin for ActiveLow<P> {
    /// Reads high while pressed
    fn is_high(&self) -> bool {
        self.is_pressed()
    }
}
