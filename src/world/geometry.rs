//! Level geometry and tuning data
//!
//! Platforms are plain records; projection onto the camera axes happens in
//! the collision resolver, never here.

use serde::{Serialize, Deserialize};
use crate::math::Vec3;

/// Half the player's 1x1x1 cube. Added to every platform extent so the
/// player can be treated as a point during overlap tests.
pub const PLAYER_HALF_EXTENT: f32 = 0.5;

/// Palette slot for the player's cube
pub const PLAYER_COLOR: usize = 0;
/// Palette slot for the player's hat
pub const HAT_COLOR: usize = 1;

/// RGB color, 0-255 per channel
pub type Rgb = [u8; 3];

/// An axis-aligned box in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Box center
    pub position: Vec3,
    /// Extent along world X
    pub width: f32,
    /// Extent along world Y
    pub height: f32,
    /// Extent along world Z. `None` means a square footprint (length = width)
    #[serde(default)]
    pub length: Option<f32>,
    /// Drawing orientation in radians. Collision treats every platform as
    /// axis aligned regardless of this value
    #[serde(default)]
    pub angle: Option<f32>,
    /// Index into the level palette
    pub color: usize,
}

impl Platform {
    pub fn new(position: Vec3, width: f32, height: f32, length: f32, color: usize) -> Self {
        Self {
            position,
            width,
            height,
            length: Some(length),
            angle: None,
            color,
        }
    }

    /// Square-footprint platform
    pub fn square(position: Vec3, width: f32, height: f32, color: usize) -> Self {
        Self {
            position,
            width,
            height,
            length: None,
            angle: None,
            color,
        }
    }

    pub fn length(&self) -> f32 {
        self.length.unwrap_or(self.width)
    }

    pub fn angle(&self) -> f32 {
        self.angle.unwrap_or(0.0)
    }

    /// World Y of the top face
    pub fn top(&self) -> f32 {
        self.position.y + self.height / 2.0
    }
}

/// The puzzle reward: a platform-like pillar that rises out of the ground
/// once the goal platform is reached
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonolithDef {
    /// Fully raised center
    pub position: Vec3,
    pub width: f32,
    pub height: f32,
    /// How far below `position` the monolith starts
    pub rise: f32,
    pub color: usize,
}

/// Tuning constants for one tick of simulation (all per-tick units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Horizontal velocity gained per tick of held input
    pub acceleration: f32,
    /// Horizontal velocity multiplier applied every tick
    pub friction: f32,
    /// Downward acceleration
    pub gravity: f32,
    /// Reduced gravity while rising with jump held
    pub jump_hold_gravity: f32,
    /// Vertical velocity set by a jump
    pub jump_velocity: f32,
    /// Falling faster than this respawns the player
    pub respawn_fall_speed: f32,
    /// Length of a perspective shift
    pub shift_ticks: u32,
    /// Length of the monolith rise animation
    pub monolith_rise_ticks: u32,
    /// Horizontal camera easing factor
    pub camera_follow: f32,
    /// World units visible across the view
    pub camera_size: f32,
    /// Camera target sits this fraction of `camera_size` above the player
    pub camera_lead: f32,
    /// Growth per tick of the post-respawn vertical easing factor
    pub teleport_ease_rate: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            acceleration: 0.04,
            friction: 0.7,
            gravity: 0.015,
            jump_hold_gravity: 0.005,
            jump_velocity: 0.2,
            respawn_fall_speed: 0.65,
            shift_ticks: 50,
            monolith_rise_ticks: 120,
            camera_follow: 0.1,
            camera_size: 15.0,
            camera_lead: 0.2,
            teleport_ease_rate: 0.01,
        }
    }
}

/// A complete level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Level {
    pub name: String,
    /// Player start, also the first respawn point
    pub spawn: Vec3,
    /// Palette. Slots 0 and 1 are the player and the hat
    pub colors: Vec<Rgb>,
    pub platforms: Vec<Platform>,
    /// Index of the platform that solves the puzzle when landed on
    pub goal: Option<usize>,
    pub monolith: Option<MonolithDef>,
    pub physics: PhysicsSettings,
}

impl Default for Level {
    fn default() -> Self {
        create_default_level()
    }
}

/// The built-in starter level
pub fn create_default_level() -> Level {
    Level {
        name: "First Steps".to_string(),
        spawn: Vec3::ZERO,
        colors: vec![
            [255, 255, 255], // player's cube
            [255, 0, 0],     // player's hat
            [240, 180, 60],  // yellow
            [238, 75, 43],   // red
            [110, 220, 230], // cyan
            [117, 185, 52],  // green
        ],
        platforms: vec![
            Platform::new(Vec3::new(0.0, -2.0, 0.0), 3.0, 1.0, 3.0, 2),
            Platform::new(Vec3::new(5.0, -1.0, 5.0), 1.0, 2.0, 3.0, 3),
            Platform::new(Vec3::new(10.0, -2.0, 10.0), 3.0, 8.0, 3.0, 4),
        ],
        goal: None,
        monolith: None,
        physics: PhysicsSettings::default(),
    }
}
