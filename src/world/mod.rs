//! World module - static level data
//!
//! Everything the simulation reads but never mutates:
//! - Platforms (axis-aligned boxes)
//! - Color palette
//! - Spawn point, puzzle goal and monolith definition
//! - Physics tuning shared by every tick

mod geometry;
mod level;

pub use geometry::*;
pub use level::*;
