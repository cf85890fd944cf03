//! Voice mixer shared with the audio callback
//!
//! Voices are mono buffers played once from the start. The callback sums
//! them into an interleaved output buffer.

use std::sync::Arc;

/// Voices beyond this are dropped, oldest first
pub const MAX_VOICES: usize = 16;

#[derive(Debug)]
struct Voice {
    samples: Arc<[f32]>,
    position: usize,
}

#[derive(Debug)]
pub struct Mixer {
    voices: Vec<Voice>,
    pub master_volume: f32,
}

impl Mixer {
    pub fn new() -> Self {
        Self {
            voices: Vec::with_capacity(MAX_VOICES),
            master_volume: 1.0,
        }
    }

    pub fn play(&mut self, samples: Arc<[f32]>) {
        if self.voices.len() >= MAX_VOICES {
            self.voices.remove(0);
        }
        self.voices.push(Voice { samples, position: 0 });
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Fill an interleaved buffer with `channels` channels per frame
    pub fn mix_into(&mut self, data: &mut [f32], channels: usize) {
        data.fill(0.0);
        let channels = channels.max(1);

        for voice in &mut self.voices {
            for frame in data.chunks_mut(channels) {
                let Some(&sample) = voice.samples.get(voice.position) else { break };
                voice.position += 1;
                for out in frame {
                    *out += sample;
                }
            }
        }
        self.voices.retain(|v| v.position < v.samples.len());

        let gain = self.master_volume;
        for out in data.iter_mut() {
            *out = (*out * gain).clamp(-1.0, 1.0);
        }
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}
