//! Gamepad support
//!
//! Native: gilrs, polled once per frame; buttons are folded into a bit mask
//! so "just pressed" is a cheap mask diff.
//! WASM: no backend; the gamepad always reads as disconnected.

use macroquad::prelude::Vec2;

// Bit indices into the button mask (Xbox layout names)
pub mod button {
    pub const A: u32 = 0;           // South
    pub const LB: u32 = 4;          // Left Bumper
    pub const RB: u32 = 5;          // Right Bumper
    pub const SELECT: u32 = 8;      // Back/Select
    pub const DPAD_DOWN: u32 = 13;
    pub const DPAD_LEFT: u32 = 14;
    pub const DPAD_RIGHT: u32 = 15;
}

/// Held and newly pressed buttons for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonMask {
    down: u32,
    pressed: u32,
}

impl ButtonMask {
    /// Next frame's mask from the raw held bits
    pub fn advance(self, down: u32) -> Self {
        Self {
            down,
            pressed: down & !self.down,
        }
    }

    pub fn is_down(&self, button: u32) -> bool {
        self.down & (1 << button) != 0
    }

    pub fn is_pressed(&self, button: u32) -> bool {
        self.pressed & (1 << button) != 0
    }
}

// ============================================================================
// WASM Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::*;

    pub struct Gamepad;

    impl Gamepad {
        pub fn new() -> Self {
            Self
        }

        pub fn poll(&mut self) {}

        pub fn has_gamepad(&self) -> bool {
            false
        }

        pub fn buttons(&self) -> ButtonMask {
            ButtonMask::default()
        }

        pub fn left_stick(&self) -> Vec2 {
            Vec2::ZERO
        }
    }

    impl Default for Gamepad {
        fn default() -> Self {
            Self::new()
        }
    }
}

// ============================================================================
// Native Implementation (gilrs)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::*;
    use gilrs::{Gilrs, Button as GilrsButton, Axis};

    pub struct Gamepad {
        /// None when the platform backend failed to start
        gilrs: Option<Gilrs>,
        deadzone: f32,
        buttons: ButtonMask,
    }

    impl Gamepad {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(gilrs) => {
                    for (_, gp) in gilrs.gamepads() {
                        log::info!("gamepad connected: {}", gp.name());
                    }
                    Some(gilrs)
                }
                Err(e) => {
                    log::warn!("gamepad support unavailable: {}", e);
                    None
                }
            };
            Self {
                gilrs,
                deadzone: 0.15,
                buttons: ButtonMask::default(),
            }
        }

        /// Call once per frame
        pub fn poll(&mut self) {
            let Some(gilrs) = &mut self.gilrs else { return };
            while let Some(event) = gilrs.next_event() {
                match event.event {
                    gilrs::EventType::Connected => log::info!("gamepad connected: {}", gilrs.gamepad(event.id).name()),
                    gilrs::EventType::Disconnected => log::info!("gamepad disconnected"),
                    _ => {}
                }
            }
            let raw = self.raw_button_mask();
            self.buttons = self.buttons.advance(raw);
        }

        pub fn has_gamepad(&self) -> bool {
            self.active_gamepad().is_some()
        }

        fn active_gamepad(&self) -> Option<gilrs::Gamepad<'_>> {
            self.gilrs.as_ref()?.gamepads().next().map(|(_, gp)| gp)
        }

        fn raw_button_mask(&self) -> u32 {
            let Some(gp) = self.active_gamepad() else { return 0 };
            let mut mask = 0u32;

            if gp.is_pressed(GilrsButton::South) { mask |= 1 << button::A; }
            if gp.is_pressed(GilrsButton::LeftTrigger) { mask |= 1 << button::LB; }
            if gp.is_pressed(GilrsButton::RightTrigger) { mask |= 1 << button::RB; }
            if gp.is_pressed(GilrsButton::Select) { mask |= 1 << button::SELECT; }
            if gp.is_pressed(GilrsButton::DPadDown) { mask |= 1 << button::DPAD_DOWN; }
            if gp.is_pressed(GilrsButton::DPadLeft) { mask |= 1 << button::DPAD_LEFT; }
            if gp.is_pressed(GilrsButton::DPadRight) { mask |= 1 << button::DPAD_RIGHT; }

            mask
        }

        pub fn buttons(&self) -> ButtonMask {
            self.buttons
        }

        pub fn left_stick(&self) -> Vec2 {
            let Some(gp) = self.active_gamepad() else { return Vec2::ZERO };
            let x = gp.value(Axis::LeftStickX);
            let y = gp.value(Axis::LeftStickY);
            apply_deadzone(x, y, self.deadzone)
        }
    }

    impl Default for Gamepad {
        fn default() -> Self {
            Self::new()
        }
    }
}

// ============================================================================
// Shared utilities
// ============================================================================

/// Apply radial deadzone with linear rescaling
pub fn apply_deadzone(x: f32, y: f32, deadzone: f32) -> Vec2 {
    let len = (x * x + y * y).sqrt();
    if len < deadzone {
        return Vec2::ZERO;
    }
    // Rescale from deadzone..1.0 to 0.0..1.0
    let scale = (len - deadzone) / (1.0 - deadzone) / len;
    Vec2::new(x * scale, y * scale)
}

pub use platform::Gamepad;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressed_is_rising_edge_only() {
        let held = 1 << button::A;
        let first = ButtonMask::default().advance(held);
        assert!(first.is_down(button::A));
        assert!(first.is_pressed(button::A));

        let second = first.advance(held);
        assert!(second.is_down(button::A));
        assert!(!second.is_pressed(button::A));

        let released = second.advance(0);
        assert!(!released.is_down(button::A));
    }

    #[test]
    fn test_deadzone() {
        assert_eq!(apply_deadzone(0.1, 0.0, 0.15), Vec2::ZERO);
        let full = apply_deadzone(1.0, 0.0, 0.15);
        assert!((full.x - 1.0).abs() < 1e-6);
        let half = apply_deadzone(0.575, 0.0, 0.15);
        assert!((half.x - 0.5).abs() < 1e-5);
    }
}
