//! Application state and the frame loop body
//!
//! The simulation runs on a fixed 15 ms tick, decoupled from the display
//! rate. Each frame: poll input, run the ticks the elapsed time allows,
//! forward events to audio, draw.

use std::path::PathBuf;
use crate::audio::AudioEngine;
use crate::game::renderer::{self, Viewport};
use crate::game::event::RespawnEvent;
use crate::game::{DrawQueue, World};
use crate::input::{Action, InputState};
use crate::world::{load_level, Level};

/// Simulation tick length
pub const TICK_SECONDS: f64 = 0.015;

/// Longer frames are truncated so a stall doesn't trigger a burst of ticks
pub const MAX_FRAME_SECONDS: f64 = 0.25;

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    tick: f64,
    accumulator: f64,
}

impl FixedTimestep {
    pub fn new(tick: f64) -> Self {
        Self { tick, accumulator: 0.0 }
    }

    /// Add a frame's elapsed time and return how many whole ticks to run.
    /// The remainder carries over to the next frame
    pub fn advance(&mut self, frame_seconds: f64) -> u32 {
        self.accumulator += frame_seconds.clamp(0.0, MAX_FRAME_SECONDS);
        let mut ticks = 0;
        while self.accumulator >= self.tick {
            self.accumulator -= self.tick;
            ticks += 1;
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(TICK_SECONDS)
    }
}

/// What the main loop should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// Main application state
pub struct AppState {
    pub world: World,
    pub input: InputState,
    pub audio: AudioEngine,
    draw_queue: DrawQueue,
    timestep: FixedTimestep,
    /// Show the F3 overlay
    pub debug: bool,
    /// Where the level came from, reloaded on restart
    level_path: Option<PathBuf>,
}

impl AppState {
    pub fn new(level: Level, level_path: Option<PathBuf>, debug: bool) -> Self {
        let input = InputState::new();
        if input.has_gamepad() {
            log::info!("gamepad ready");
        }
        Self {
            world: World::new(level),
            input,
            audio: AudioEngine::new(),
            draw_queue: DrawQueue::new(),
            timestep: FixedTimestep::default(),
            debug,
            level_path,
        }
    }

    /// Restart the level, picking up edits to its file when there is one
    fn restart(&mut self) {
        let reloaded = self.level_path.as_ref().and_then(|path| match load_level(path) {
            Ok(level) => Some(level),
            Err(e) => {
                log::warn!("keeping current level, reload of {} failed: {}", path.display(), e);
                None
            }
        });
        match reloaded {
            Some(level) => self.world = World::new(level),
            None => self.world.restart(),
        }
        self.input.clear_pending();
        self.timestep.reset();
    }

    /// Run the simulation for one rendered frame (no drawing)
    pub fn update(&mut self, frame_seconds: f64) -> FrameOutcome {
        self.input.poll();

        #[cfg(not(target_arch = "wasm32"))]
        if self.input.action_pressed(Action::Quit) {
            return FrameOutcome::Quit;
        }
        if self.input.action_pressed(Action::ToggleDebug) {
            self.debug = !self.debug;
        }
        if self.input.action_pressed(Action::Restart) {
            self.restart();
            return FrameOutcome::Continue;
        }

        for _ in 0..self.timestep.advance(frame_seconds) {
            let snapshot = self.input.snapshot();
            self.world.tick(&snapshot);
        }

        for sound in self.world.events.sounds.drain() {
            self.audio.play(sound);
        }
        for RespawnEvent { from, to } in self.world.events.respawns.drain() {
            log::info!(
                "respawn: caught fall at ({:.2}, {:.2}, {:.2}), back to ({:.2}, {:.2}, {:.2})",
                from.x, from.y, from.z, to.x, to.y, to.z
            );
        }
        let solved: Vec<usize> = self.world.events.puzzle_solved.drain().collect();
        for goal in solved {
            log::info!(
                "'{}' solved on platform {} after {} ticks",
                self.world.level().name,
                goal,
                self.world.ticks()
            );
        }
        self.world.events.clear_all();

        FrameOutcome::Continue
    }

    pub fn draw(&mut self, viewport: &Viewport) {
        renderer::draw_world(&self.world, &mut self.draw_queue, viewport);
        if self.debug {
            renderer::draw_debug_overlay(&self.world);
        }
    }
}
