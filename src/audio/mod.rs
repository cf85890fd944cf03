//! Audio: procedural sound effects mixed into one output stream

mod engine;
mod mixer;
mod synth;

pub use engine::AudioEngine;
