//! Servo bank with slew limiting
//!
//! Holds the angle every output currently shows and the angle it is
//! heading to. Immediate moves jump straight to the target; eased moves
//! are walked there a few degrees per update, which is what makes a
//! turnout blade or semaphore arm move at scale speed.
//!
//! # Usage
//!
//! ```ignore
//! let mut bank: ServoBank<16> = ServoBank::new(SlewConfig::default());
//! bank.apply(Move::eased(3, 50));
//!
//! // Every servo update period:
//! for (channel, angle) in bank.update() {
//!     pwm.set_angle(channel, angle)?;
//! }
//! ```

use heapless::Vec;
use pointsman_core::traits::{Motion, Move};

/// Slew configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlewConfig {
    /// Largest angle change per update during an eased move
    pub degrees_per_update: u8,
}

impl Default for SlewConfig {
    fn default() -> Self {
        // 20 ms updates: 180 degrees in 1.8 s
        Self {
            degrees_per_update: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Servo {
    /// Angle last sent to the output, `None` until the first command
    current: Option<u8>,
    target: u8,
    /// Output needs rewriting on the next update
    pending: bool,
}

/// A bank of `N` slew-limited servo outputs
pub struct ServoBank<const N: usize> {
    config: SlewConfig,
    servos: [Servo; N],
}

impl<const N: usize> ServoBank<N> {
    pub fn new(config: SlewConfig) -> Self {
        Self {
            config,
            servos: [Servo::default(); N],
        }
    }

    /// Jump an output to `angle` on the next update
    ///
    /// Returns `false` for a channel the bank does not have.
    pub fn set_immediate(&mut self, channel: u8, angle: u8) -> bool {
        let Some(servo) = self.servos.get_mut(channel as usize) else {
            return false;
        };
        servo.current = Some(angle);
        servo.target = angle;
        servo.pending = true;
        true
    }

    /// Start walking an output towards `angle`
    ///
    /// An output that has never been commanded has no known position and
    /// jumps.
    pub fn set_target(&mut self, channel: u8, angle: u8) -> bool {
        let Some(servo) = self.servos.get_mut(channel as usize) else {
            return false;
        };
        if servo.current.is_none() {
            servo.current = Some(angle);
            servo.pending = true;
        }
        servo.target = angle;
        true
    }

    /// Apply a controller move
    pub fn apply(&mut self, cmd: Move) -> bool {
        match cmd.motion {
            Motion::Eased => self.set_target(cmd.channel, cmd.angle),
            Motion::Immediate => self.set_immediate(cmd.channel, cmd.angle),
        }
    }

    /// Angle an output currently shows
    pub fn current(&self, channel: u8) -> Option<u8> {
        self.servos.get(channel as usize).and_then(|s| s.current)
    }

    /// Check if every output has reached its target
    pub fn is_settled(&self) -> bool {
        self.servos
            .iter()
            .all(|s| !s.pending && s.current.map_or(true, |c| c == s.target))
    }

    /// Advance every moving output one slew step
    ///
    /// Returns the `(channel, angle)` pairs that must be written out.
    pub fn update(&mut self) -> Vec<(u8, u8), N> {
        let step = self.config.degrees_per_update.max(1);
        let mut changed = Vec::new();

        for (i, servo) in self.servos.iter_mut().enumerate() {
            let Some(current) = servo.current else {
                continue;
            };

            let next = if current < servo.target {
                current.saturating_add(step).min(servo.target)
            } else {
                current.saturating_sub(step).max(servo.target)
            };

            if next != current || servo.pending {
                servo.current = Some(next);
                servo.pending = false;
                // Capacity is N, one entry per servo at most
                let _ = changed.push((i as u8, next));
            }
        }

        changed
    }
}
