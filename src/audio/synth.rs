//! Procedural sound effects
//!
//! Every effect is a closed-form waveform of time, rendered once into a mono
//! buffer at startup.

use std::f32::consts::{FRAC_PI_2, TAU};
use std::sync::Arc;
use crate::game::{ShiftDirection, SoundEvent};

/// Sample rate for audio output
pub const SAMPLE_RATE: u32 = 44100;

/// Sample `wave` over `duration` seconds
pub fn render(duration: f32, wave: impl Fn(f32) -> f32) -> Vec<f32> {
    let samples = (SAMPLE_RATE as f32 * duration).round() as usize;
    (0..samples)
        .map(|i| wave(i as f32 / SAMPLE_RATE as f32))
        .collect()
}

pub fn jump() -> Vec<f32> {
    render(0.4, |t| ((880.0 + 600.0 * t) * t).sin() * t.min(0.1 - t / 4.0).min(0.1))
}

pub fn shift(direction: ShiftDirection) -> Vec<f32> {
    let d = direction.sign() * FRAC_PI_2;
    render(0.9, move |t| {
        let frequency = (120.0 + d * 15.0) + ((250.0 * t).sin() + 1.0);
        (frequency * 9.0 * t).sin() * t.min((0.9 - t) / 5.0).min(0.1)
    })
}

pub fn death() -> Vec<f32> {
    render(0.2, |t| ((3880.0 - 10000.0 * t) * t).sin() * t.min(0.2 - t).min(0.2))
}

/// Four rising notes (C major), overlapping tails
pub fn puzzle_solved() -> Vec<f32> {
    const NOTES: [f32; 4] = [523.25, 659.25, 783.99, 1046.5];
    const STEP: f32 = 0.2;
    const NOTE_LEN: f32 = 0.6;

    render(1.2, |t| {
        NOTES
            .iter()
            .enumerate()
            .map(|(i, &freq)| {
                let local = t - i as f32 * STEP;
                if !(0.0..NOTE_LEN).contains(&local) {
                    return 0.0;
                }
                let envelope = (local * 20.0).min((NOTE_LEN - local) / NOTE_LEN).min(1.0) * 0.06;
                (TAU * freq * local).sin() * envelope
            })
            .sum()
    })
}

/// Every effect, rendered once
#[derive(Debug, Clone)]
pub struct SoundBank {
    jump: Arc<[f32]>,
    shift_left: Arc<[f32]>,
    shift_right: Arc<[f32]>,
    death: Arc<[f32]>,
    solved: Arc<[f32]>,
}

impl SoundBank {
    pub fn new() -> Self {
        Self {
            jump: jump().into(),
            shift_left: shift(ShiftDirection::Left).into(),
            shift_right: shift(ShiftDirection::Right).into(),
            death: death().into(),
            solved: puzzle_solved().into(),
        }
    }

    pub fn get(&self, event: SoundEvent) -> Arc<[f32]> {
        let samples = match event {
            SoundEvent::Jump => &self.jump,
            SoundEvent::Shift { direction: ShiftDirection::Left } => &self.shift_left,
            SoundEvent::Shift { direction: ShiftDirection::Right } => &self.shift_right,
            SoundEvent::Death => &self.death,
            SoundEvent::PuzzleSolved => &self.solved,
        };
        Arc::clone(samples)
    }
}

impl Default for SoundBank {
    fn default() -> Self {
        Self::new()
    }
}
