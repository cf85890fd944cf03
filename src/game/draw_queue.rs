//! Draw queue: oriented boxes handed to the renderer
//!
//! Filled once per frame, sorted back to front, drained by the renderer.

use crate::math::Vec3;
use crate::world::Platform;
use super::camera::CameraBasis;

/// A box to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeDraw {
    pub position: Vec3,
    pub width: f32,
    pub height: f32,
    /// `None` means square (length = width)
    pub length: Option<f32>,
    /// Radians, world space
    pub angle: f32,
    pub color: usize,
}

impl CubeDraw {
    pub fn cube(position: Vec3, size: f32, angle: f32, color: usize) -> Self {
        Self {
            position,
            width: size,
            height: size,
            length: None,
            angle,
            color,
        }
    }

    pub fn length(&self) -> f32 {
        self.length.unwrap_or(self.width)
    }
}

impl From<&Platform> for CubeDraw {
    fn from(p: &Platform) -> Self {
        Self {
            position: p.position,
            width: p.width,
            height: p.height,
            length: p.length,
            angle: p.angle(),
            color: p.color,
        }
    }
}

#[derive(Debug, Default)]
pub struct DrawQueue {
    cubes: Vec<CubeDraw>,
}

impl DrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cube: CubeDraw) {
        self.cubes.push(cube);
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// Farthest along `basis.forward` first
    pub fn sort_back_to_front(&mut self, basis: &CameraBasis) {
        self.cubes.sort_by(|a, b| {
            basis.depth_of(b.position).total_cmp(&basis.depth_of(a.position))
        });
    }

    /// Hand every queued box to the caller, leaving the queue empty
    pub fn drain(&mut self) -> impl Iterator<Item = CubeDraw> + '_ {
        self.cubes.drain(..)
    }
}
