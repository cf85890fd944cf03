//! Input state management
//!
//! Polls keyboard (macroquad) and gamepad (gilrs) input once per frame and
//! turns them into actions and per-tick snapshots.

use macroquad::prelude::*;
use crate::game::ShiftDirection;
use super::gamepad::{button, Gamepad};
use super::snapshot::{movement_axis, InputSnapshot, ShiftLatch};
use super::Action;

/// Unified keyboard + gamepad input
pub struct InputState {
    gamepad: Gamepad,
    shift: ShiftLatch,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            gamepad: Gamepad::new(),
            shift: ShiftLatch::default(),
        }
    }

    /// Call once per frame before running ticks
    pub fn poll(&mut self) {
        self.gamepad.poll();

        if self.action_pressed(Action::ShiftLeft) {
            self.shift.press(ShiftDirection::Left);
        }
        if self.action_pressed(Action::ShiftRight) {
            self.shift.press(ShiftDirection::Right);
        }
    }

    /// Snapshot for one tick. A pending shift goes to the first caller only
    pub fn snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            movement: movement_axis(
                self.action_down(Action::MoveLeft),
                self.action_down(Action::MoveRight),
                self.gamepad.left_stick().x,
            ),
            jump: self.action_down(Action::Jump),
            fast_fall: self.action_down(Action::FastFall),
            shift: self.shift.take(),
        }
    }

    /// Drop a pending shift (after restarting a level)
    pub fn clear_pending(&mut self) {
        self.shift.clear();
    }

    /// Check if action is currently held down
    pub fn action_down(&self, action: Action) -> bool {
        self.keyboard_down(action) || self.gamepad_down(action)
    }

    /// Check if action was just pressed this frame
    pub fn action_pressed(&self, action: Action) -> bool {
        self.keyboard_pressed(action) || self.gamepad_pressed(action)
    }

    fn keyboard_down(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => is_key_down(KeyCode::Left),
            Action::MoveRight => is_key_down(KeyCode::Right),
            Action::Jump => is_key_down(KeyCode::Space),
            Action::FastFall => is_key_down(KeyCode::Down),
            Action::ShiftLeft => is_key_down(KeyCode::A),
            Action::ShiftRight => is_key_down(KeyCode::D),
            Action::ToggleDebug => is_key_down(KeyCode::F3),
            Action::Restart => is_key_down(KeyCode::R),
            Action::Quit => is_key_down(KeyCode::Escape),
        }
    }

    fn keyboard_pressed(&self, action: Action) -> bool {
        match action {
            Action::Jump => is_key_pressed(KeyCode::Space),
            Action::ShiftLeft => is_key_pressed(KeyCode::A),
            Action::ShiftRight => is_key_pressed(KeyCode::D),
            Action::ToggleDebug => is_key_pressed(KeyCode::F3),
            Action::Restart => is_key_pressed(KeyCode::R),
            Action::Quit => is_key_pressed(KeyCode::Escape),
            _ => false,
        }
    }

    fn gamepad_down(&self, action: Action) -> bool {
        let buttons = self.gamepad.buttons();
        match action {
            Action::MoveLeft => buttons.is_down(button::DPAD_LEFT),
            Action::MoveRight => buttons.is_down(button::DPAD_RIGHT),
            Action::Jump => buttons.is_down(button::A),
            Action::FastFall => buttons.is_down(button::DPAD_DOWN) || self.gamepad.left_stick().y < -0.5,
            Action::ShiftLeft => buttons.is_down(button::LB),
            Action::ShiftRight => buttons.is_down(button::RB),
            Action::Restart => buttons.is_down(button::SELECT),
            _ => false,
        }
    }

    fn gamepad_pressed(&self, action: Action) -> bool {
        let buttons = self.gamepad.buttons();
        match action {
            Action::Jump => buttons.is_pressed(button::A),
            Action::ShiftLeft => buttons.is_pressed(button::LB),
            Action::ShiftRight => buttons.is_pressed(button::RB),
            Action::Restart => buttons.is_pressed(button::SELECT),
            _ => false,
        }
    }

    /// Check if any gamepad is connected
    pub fn has_gamepad(&self) -> bool {
        self.gamepad.has_gamepad()
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
