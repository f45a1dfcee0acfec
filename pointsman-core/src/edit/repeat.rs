//! Accelerating button repeat
//!
//! Holding Increase or Decrease steps the edited angle once on press and
//! then again each time a deadline passes. The gap between steps starts at
//! `repeat_initial_ms` and shrinks by `repeat_step_ms` after every repeat
//! until it reaches `repeat_floor_ms`. The ramp never reverses while the
//! button stays held.

use crate::config::ControllerConfig;

/// Most steps a single tick will catch up on
///
/// A tick that arrives very late (debugger halt, long flash erase) would
/// otherwise fire an unbounded burst of steps.
pub const MAX_CATCH_UP: u8 = 8;

/// Direction of an angle adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    /// Signed step in degrees
    pub const fn delta(self) -> i16 {
        match self {
            Direction::Increase => 1,
            Direction::Decrease => -1,
        }
    }
}

/// Repeat state of a held adjustment button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Repeat {
    direction: Direction,
    next_at: u32,
    period: u32,
}

impl Repeat {
    /// Start repeating at `now`
    ///
    /// The press itself is the first step; the caller applies it.
    pub fn start(direction: Direction, now_ms: u32, config: &ControllerConfig) -> Self {
        Self {
            direction,
            next_at: now_ms.wrapping_add(config.repeat_initial_ms),
            period: config.repeat_initial_ms,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Time of the next step
    pub fn next_at(&self) -> u32 {
        self.next_at
    }

    /// Gap that led up to the next step
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Count the steps due at `now` and advance the deadline past them
    pub fn due_steps(&mut self, now_ms: u32, config: &ControllerConfig) -> u8 {
        let mut steps = 0;

        while steps < MAX_CATCH_UP && deadline_reached(now_ms, self.next_at) {
            steps += 1;
            self.period = self
                .period
                .saturating_sub(config.repeat_step_ms)
                .max(config.repeat_floor_ms);
            self.next_at = self.next_at.wrapping_add(self.period);
        }

        // Drop the backlog rather than carry it into later ticks
        if deadline_reached(now_ms, self.next_at) {
            self.next_at = now_ms.wrapping_add(self.period);
        }

        steps
    }
}

/// Check if `deadline` is at or before `now`, across timer wrap
fn deadline_reached(now_ms: u32, deadline: u32) -> bool {
    (now_ms.wrapping_sub(deadline) as i32) >= 0
}
