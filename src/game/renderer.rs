//! Cube renderer
//!
//! Draws the queue of oriented boxes as axonometric cubes: every box shows
//! at most two vertical walls, each a flat shaded rectangle. Shading comes
//! from how squarely the wall faces the camera.

use std::f32::consts::{FRAC_PI_2, PI, TAU};
use macroquad::prelude::*;
use crate::math::Vec3;
use crate::world::Rgb;
use super::camera::CameraBasis;
use super::draw_queue::{CubeDraw, DrawQueue};
use super::shift::ShiftState;
use super::world::World;

pub const BACKGROUND: Color = Color::new(0x14 as f32 / 255.0, 0x15 as f32 / 255.0, 0x23 as f32 / 255.0, 1.0);

/// Drawn for out-of-range palette indices
const MISSING_COLOR: Rgb = [255, 0, 255];

/// The square drawing area inside the window, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl Viewport {
    /// Largest centered square that fits the window
    pub fn fit(width: f32, height: f32) -> Self {
        let size = width.min(height);
        Self {
            x: (width - size) / 2.0,
            y: (height - size) / 2.0,
            size,
        }
    }

    /// Pixels per world unit
    pub fn scale(&self, camera_size: f32) -> f32 {
        self.size / camera_size
    }

    /// Pixel position of a camera-relative screen point (Y up)
    pub fn to_pixels(&self, x: f32, y: f32, camera_size: f32) -> (f32, f32) {
        let scale = self.scale(camera_size);
        let half = self.size / 2.0;
        (self.x + half + x * scale, self.y + half - y * scale)
    }
}

/// One visible wall of a box, along screen X relative to the box center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub offset: f32,
    pub size: f32,
    /// Brightness multiplier in [0.3, 1]
    pub shade: f32,
}

/// The two walls a box shows for a given view angle
pub fn cube_walls(width: f32, length: f32, local_angle: f32, camera_angle: f32) -> [Wall; 2] {
    let angle = local_angle - camera_angle;
    let half_turn = angle.rem_euclid(PI);
    let quarter_turn = half_turn.rem_euclid(FRAC_PI_2);

    // past a quarter turn the other pair of faces is visible
    let (width, length) = if half_turn >= FRAC_PI_2 {
        (length, width)
    } else {
        (width, length)
    };

    let edge_delta = width.atan2(length);
    let half_diagonal = (width * width + length * length).sqrt() / 2.0;

    let wall = |edge_angle: f32, size: f32, facing: f32| Wall {
        offset: (edge_angle + quarter_turn).sin() * half_diagonal,
        size: size * facing,
        shade: facing * 0.7 + 0.3,
    };

    [
        wall(PI + edge_delta, length, quarter_turn.sin()),
        wall(TAU - edge_delta, width, quarter_turn.cos()),
    ]
}

fn shaded(rgb: Rgb, shade: f32) -> Color {
    Color::from_rgba(
        (rgb[0] as f32 * shade) as u8,
        (rgb[1] as f32 * shade) as u8,
        (rgb[2] as f32 * shade) as u8,
        255,
    )
}

fn draw_cube(cube: &CubeDraw, camera_position: Vec3, camera_angle: f32, camera_size: f32, colors: &[Rgb], viewport: &Viewport) {
    let basis = CameraBasis::from_angle(camera_angle);
    let p = basis.project(camera_position, cube.position);
    let rgb = colors.get(cube.color).copied().unwrap_or(MISSING_COLOR);
    let scale = viewport.scale(camera_size);

    for wall in cube_walls(cube.width, cube.length(), cube.angle, camera_angle) {
        if wall.size <= 0.0 {
            continue;
        }
        let (px, py) = viewport.to_pixels(p.x + wall.offset, p.y + cube.height / 2.0, camera_size);
        draw_rectangle(px, py, wall.size * scale, cube.height * scale, shaded(rgb, wall.shade));
    }
}

/// Fill `queue` from the world and draw it. The queue is empty afterwards
pub fn draw_world(world: &World, queue: &mut DrawQueue, viewport: &Viewport) {
    clear_background(BACKGROUND);

    world.populate_draw_queue(queue);
    let camera = &world.camera;
    let colors = &world.level().colors;
    for cube in queue.drain() {
        draw_cube(&cube, camera.position, camera.angle, camera.size, colors, viewport);
    }
}

/// F3 overlay: simulation state and process memory
pub fn draw_debug_overlay(world: &World) {
    let player = &world.player;
    let safe = world.last_grounded();
    let shift = match world.shift.state() {
        ShiftState::Idle => "idle".to_string(),
        ShiftState::Shifting { direction, elapsed, duration, .. } => {
            format!("{} {}/{}", direction.label(), elapsed, duration)
        }
    };
    let memory = match memory_stats::memory_stats() {
        Some(stats) => format!("{:.1} MB", stats.physical_mem as f64 / (1024.0 * 1024.0)),
        None => "n/a".to_string(),
    };

    let lines = [
        format!("{}  tick {}  {} fps", world.level().name, world.ticks(), get_fps()),
        format!(
            "pos ({:.2}, {:.2}, {:.2})",
            player.position.x, player.position.y, player.position.z
        ),
        format!(
            "vh {:.3}  vv {:.3}  grounded {}",
            player.horizontal_velocity, player.vertical_velocity, player.grounded
        ),
        format!("safe ({:.2}, {:.2}, {:.2})", safe.x, safe.y, safe.z),
        format!("angle {:.1}°  shift {}", world.camera.angle.to_degrees(), shift),
        format!("solved {}  mem {}", world.puzzle().is_solved(), memory),
    ];

    let height = 8.0 + lines.len() as f32 * 16.0;
    draw_rectangle(4.0, 4.0, 320.0, height, Color::from_rgba(0, 0, 0, 180));
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 10.0, 20.0 + i as f32 * 16.0, 16.0, Color::from_rgba(200, 200, 210, 255));
    }
}
