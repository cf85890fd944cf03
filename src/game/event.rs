//! Event System
//!
//! The simulation never calls into audio or logging directly. It sends
//! events; the app shell drains them after each frame:
//! 1. World lands the player on the goal → sends SoundEvent::PuzzleSolved
//! 2. Audio engine drains sounds → plays the arpeggio
//!
//! Events are fire-and-forget. Nothing waits on a consumer.

use crate::math::Vec3;
use super::shift::ShiftDirection;

/// A queue for events of a single type.
/// Events are collected during the tick and drained at specific points.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clear all events without processing
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Procedural sound triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    Jump,
    Shift { direction: ShiftDirection },
    Death,
    PuzzleSolved,
}

/// The player was sent back to safety
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RespawnEvent {
    /// Where the fall was caught
    pub from: Vec3,
    /// Last grounded position
    pub to: Vec3,
}

/// Container for all game events
#[derive(Debug, Default)]
pub struct Events {
    pub sounds: EventQueue<SoundEvent>,
    pub respawns: EventQueue<RespawnEvent>,
    /// Platform index of the goal, once per solve
    pub puzzle_solved: EventQueue<usize>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all event queues. Call at end of frame.
    pub fn clear_all(&mut self) {
        self.sounds.clear();
        self.respawns.clear();
        self.puzzle_solved.clear();
    }
}
