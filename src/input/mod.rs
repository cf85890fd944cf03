//! Input handling with gamepad support
//!
//! Action-based input over keyboard and gamepad. The simulation never reads
//! devices: it gets an `InputSnapshot` per tick.
//!
//! Native: gilrs for gamepads
//! WASM: keyboard only

mod actions;
mod gamepad;
mod snapshot;
mod state;

pub use actions::*;
pub use snapshot::*;
pub use state::*;
