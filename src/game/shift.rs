//! Perspective shift: quarter-turn camera rotation
//!
//! One shift in flight at a time. Triggers while Shifting are dropped.

use std::f32::consts::{FRAC_PI_2, PI, TAU};
use crate::math::ease_in_out;

/// Which way the camera turns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    Left,
    Right,
}

impl ShiftDirection {
    pub fn sign(self) -> f32 {
        match self {
            ShiftDirection::Left => -1.0,
            ShiftDirection::Right => 1.0,
        }
    }

    /// Signed quarter turn
    pub fn radians(self) -> f32 {
        self.sign() * FRAC_PI_2
    }

    pub fn label(self) -> &'static str {
        match self {
            ShiftDirection::Left => "left",
            ShiftDirection::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShiftState {
    Idle,
    Shifting {
        start: f32,
        direction: ShiftDirection,
        elapsed: u32,
        duration: u32,
    },
}

#[derive(Debug, Clone)]
pub struct PerspectiveShift {
    state: ShiftState,
}

impl PerspectiveShift {
    pub fn new() -> Self {
        Self { state: ShiftState::Idle }
    }

    pub fn state(&self) -> ShiftState {
        self.state
    }

    pub fn is_shifting(&self) -> bool {
        matches!(self.state, ShiftState::Shifting { .. })
    }

    /// Start a shift from `angle`. Returns false (and changes nothing) when
    /// one is already running
    pub fn trigger(&mut self, direction: ShiftDirection, angle: f32, duration: u32) -> bool {
        if self.is_shifting() {
            return false;
        }
        self.state = ShiftState::Shifting {
            start: angle,
            direction,
            elapsed: 0,
            duration: duration.max(1),
        };
        true
    }

    /// Advance one tick and return the camera angle to use.
    /// The final tick lands exactly on `(start + direction) mod 2π`.
    pub fn update(&mut self) -> Option<f32> {
        let ShiftState::Shifting { start, direction, elapsed, duration } = &mut self.state else {
            return None;
        };

        *elapsed += 1;
        if *elapsed >= *duration {
            let target = (*start + direction.radians()).rem_euclid(TAU);
            self.state = ShiftState::Idle;
            return Some(target);
        }

        let t = *elapsed as f32 / *duration as f32;
        Some(*start + direction.radians() * ease_in_out(t))
    }

    /// Linear progress in [0, 1]; 0 when idle
    pub fn progress(&self) -> f32 {
        match self.state {
            ShiftState::Idle => 0.0,
            ShiftState::Shifting { elapsed, duration, .. } => elapsed as f32 / duration as f32,
        }
    }

    /// Extra wobble applied to the player's cube while the world turns
    pub fn tilt(&self) -> f32 {
        match self.state {
            ShiftState::Idle => 0.0,
            ShiftState::Shifting { direction, .. } => {
                -(self.progress() * PI * direction.sign()).sin() * 0.4
            }
        }
    }
}

impl Default for PerspectiveShift {
    fn default() -> Self {
        Self::new()
    }
}
