//! Player kinematics
//!
//! Horizontal velocity is a scalar along camera right, not a world vector:
//! after a shift the same momentum points along the new right axis.

use crate::math::Vec3;
use crate::world::PhysicsSettings;
use super::camera::CameraBasis;
use super::collision::{ProposedMove, Resolution};

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Vec3,
    pub horizontal_velocity: f32,
    pub vertical_velocity: f32,
    /// Set only by a landing during the current tick
    pub grounded: bool,
}

impl Player {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            horizontal_velocity: 0.0,
            vertical_velocity: 0.0,
            grounded: false,
        }
    }

    /// `movement` is the signed input axis in [-1, 1]
    pub fn accelerate(&mut self, movement: f32, physics: &PhysicsSettings) {
        self.horizontal_velocity += movement * physics.acceleration;
        self.horizontal_velocity *= physics.friction;
    }

    /// Returns true when a jump started
    pub fn try_jump(&mut self, jump_held: bool, fast_fall_held: bool, physics: &PhysicsSettings) -> bool {
        if self.grounded && jump_held && !fast_fall_held {
            self.vertical_velocity = physics.jump_velocity;
            return true;
        }
        false
    }

    /// Holding jump on the way up gives a higher jump
    pub fn apply_gravity(&mut self, jump_held: bool, physics: &PhysicsSettings) {
        let gravity = if self.vertical_velocity > 0.0 && jump_held {
            physics.jump_hold_gravity
        } else {
            physics.gravity
        };
        self.vertical_velocity -= gravity;
    }

    pub fn proposed_move(&self, drop_through: bool) -> ProposedMove {
        ProposedMove {
            horizontal: self.horizontal_velocity,
            vertical: self.vertical_velocity,
            drop_through,
        }
    }

    /// Apply a resolved move. Grounded is recomputed from scratch
    pub fn apply(&mut self, resolution: &Resolution, basis: &CameraBasis) {
        self.grounded = false;

        if resolution.blocked_horizontal {
            self.horizontal_velocity = 0.0;
        }
        if resolution.blocked_vertical {
            self.vertical_velocity = 0.0;
        }

        self.position += basis.to_world(resolution.horizontal, 0.0, resolution.depth);

        match resolution.landing {
            Some(landing) => {
                self.position.y = landing.y;
                self.vertical_velocity = 0.0;
                self.grounded = true;
            }
            None => self.position.y += resolution.vertical,
        }
    }

    pub fn teleport(&mut self, to: Vec3) {
        self.position = to;
        self.horizontal_velocity = 0.0;
        self.vertical_velocity = 0.0;
        self.grounded = false;
    }
}
