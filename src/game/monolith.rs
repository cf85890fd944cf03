//! Puzzle goal and the monolith it raises
//!
//! Landing on the goal platform solves the level once. The monolith (when
//! the level has one) then rises out of the ground with the same ease the
//! camera uses for a shift. It is solid the whole time.

use crate::math::ease_in_out;
use crate::world::{MonolithDef, Platform};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonolithState {
    Dormant,
    Rising { elapsed: u32 },
    Raised,
}

#[derive(Debug, Clone)]
pub struct Monolith {
    def: MonolithDef,
    state: MonolithState,
}

impl Monolith {
    pub fn new(def: MonolithDef) -> Self {
        Self { def, state: MonolithState::Dormant }
    }

    pub fn state(&self) -> MonolithState {
        self.state
    }

    pub fn start_rising(&mut self) {
        if self.state == MonolithState::Dormant {
            self.state = MonolithState::Rising { elapsed: 0 };
        }
    }

    pub fn update(&mut self, duration: u32) {
        if let MonolithState::Rising { elapsed } = self.state {
            let elapsed = elapsed + 1;
            self.state = if elapsed >= duration.max(1) {
                MonolithState::Raised
            } else {
                MonolithState::Rising { elapsed }
            };
        }
    }

    /// 0 while dormant, 1 once raised
    pub fn raised_fraction(&self, duration: u32) -> f32 {
        match self.state {
            MonolithState::Dormant => 0.0,
            MonolithState::Rising { elapsed } => ease_in_out(elapsed as f32 / duration.max(1) as f32),
            MonolithState::Raised => 1.0,
        }
    }

    /// The monolith as a collidable box at its current height
    pub fn platform(&self, duration: u32) -> Platform {
        let mut position = self.def.position;
        position.y -= self.def.rise * (1.0 - self.raised_fraction(duration));
        Platform::square(position, self.def.width, self.def.height, self.def.color)
    }
}

/// Goal tracking for one level attempt
#[derive(Debug, Clone)]
pub struct Puzzle {
    goal: Option<usize>,
    solved: bool,
    monolith: Option<Monolith>,
}

impl Puzzle {
    pub fn new(goal: Option<usize>, monolith: Option<MonolithDef>) -> Self {
        Self {
            goal,
            solved: false,
            monolith: monolith.map(Monolith::new),
        }
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn monolith(&self) -> Option<&Monolith> {
        self.monolith.as_ref()
    }

    /// Feed the platform landed on this tick. Returns true exactly once,
    /// on the tick the goal is first reached
    pub fn on_landing(&mut self, platform: usize) -> bool {
        if self.solved || self.goal != Some(platform) {
            return false;
        }
        self.solved = true;
        if let Some(monolith) = &mut self.monolith {
            monolith.start_rising();
        }
        true
    }

    pub fn update(&mut self, duration: u32) {
        if let Some(monolith) = &mut self.monolith {
            monolith.update(duration);
        }
    }
}
