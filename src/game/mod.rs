//! Game Module
//!
//! The simulation core and its renderer.
//!
//! Key concepts:
//! - Camera: an angle that only rests on quarter turns, plus its basis
//! - Shift: the animated quarter turn, during which the player is frozen
//! - Collision: screen-space overlap resolved by moving along depth
//! - World: all mutable state, advanced by a fixed tick
//! - Event: sounds and respawns sent out of the tick, drained by the app

pub mod camera;
pub mod shift;
pub mod collision;
pub mod player;
pub mod respawn;
pub mod monolith;
pub mod event;
pub mod draw_queue;
pub mod world;
pub mod renderer;

// Re-export main types
pub use camera::{Camera, CameraBasis};
pub use shift::{PerspectiveShift, ShiftDirection, ShiftState};
pub use event::{Events, SoundEvent};
pub use draw_queue::{CubeDraw, DrawQueue};
pub use world::World;
