//! Per-tick input value consumed by the simulation

use crate::game::ShiftDirection;

/// Everything one tick needs to know about the controls
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Signed axis in [-1, 1]; negative is left along camera right
    pub movement: f32,
    pub jump: bool,
    pub fast_fall: bool,
    /// Edge-triggered, present on at most one tick per press
    pub shift: Option<ShiftDirection>,
}

/// Combine digital keys with an analog stick, keeping the stronger one
pub fn movement_axis(left: bool, right: bool, stick_x: f32) -> f32 {
    let keys = (right as i8 - left as i8) as f32;
    let axis = if stick_x.abs() > keys.abs() { stick_x } else { keys };
    axis.clamp(-1.0, 1.0)
}

/// Holds a shift press until a tick consumes it. Frames can run zero ticks,
/// so a press must survive until the next tick
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftLatch {
    pending: Option<ShiftDirection>,
}

impl ShiftLatch {
    /// The first unconsumed press wins
    pub fn press(&mut self, direction: ShiftDirection) {
        if self.pending.is_none() {
            self.pending = Some(direction);
        }
    }

    pub fn take(&mut self) -> Option<ShiftDirection> {
        self.pending.take()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
