//! Audio output
//!
//! Platform-specific audio output:
//! - Native: cpal stream pulling from the shared mixer
//! - WASM: silent

use std::sync::{Arc, Mutex};
use crate::game::SoundEvent;
use super::mixer::Mixer;
use super::synth::SoundBank;
#[cfg(not(target_arch = "wasm32"))]
use super::synth::SAMPLE_RATE;

// =============================================================================
// Native audio output using cpal
// =============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;
    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use cpal::{Stream, SampleRate, StreamConfig};

    pub fn init_audio_stream(mixer: Arc<Mutex<Mixer>>) -> Option<Stream> {
        let host = cpal::default_host();
        let Some(device) = host.default_output_device() else {
            log::warn!("no audio output device, running silent");
            return None;
        };
        if let Ok(name) = device.name() {
            log::info!("audio output: {}", name);
        }

        let config = StreamConfig {
            channels: 2,
            sample_rate: SampleRate(SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Default,
        };
        let channels = config.channels as usize;

        let stream = device.build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                match mixer.lock() {
                    Ok(mut mixer) => mixer.mix_into(data, channels),
                    Err(_) => data.fill(0.0),
                }
            },
            |err| log::error!("audio stream error: {}", err),
            None,
        );
        let stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                log::warn!("could not open audio stream: {}", e);
                return None;
            }
        };

        if let Err(e) = stream.play() {
            log::warn!("could not start audio stream: {}", e);
            return None;
        }
        Some(stream)
    }
}

// =============================================================================
// AudioEngine - cross-platform wrapper
// =============================================================================

/// Plays sound events fire-and-forget
pub struct AudioEngine {
    mixer: Arc<Mutex<Mixer>>,
    bank: SoundBank,
    /// The audio stream (native only, kept alive)
    #[cfg(not(target_arch = "wasm32"))]
    _stream: Option<cpal::Stream>,
}

impl AudioEngine {
    pub fn new() -> Self {
        let mixer = Arc::new(Mutex::new(Mixer::new()));
        let bank = SoundBank::new();

        #[cfg(not(target_arch = "wasm32"))]
        {
            let stream = native::init_audio_stream(Arc::clone(&mixer));
            Self {
                mixer,
                bank,
                _stream: stream,
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            log::info!("audio disabled on web builds");
            Self { mixer, bank }
        }
    }

    /// True when sound actually reaches a device
    pub fn is_active(&self) -> bool {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self._stream.is_some()
        }
        #[cfg(target_arch = "wasm32")]
        {
            false
        }
    }

    pub fn play(&self, event: SoundEvent) {
        if !self.is_active() {
            return;
        }
        if let Ok(mut mixer) = self.mixer.lock() {
            mixer.play(self.bank.get(event));
        }
    }

    pub fn set_master_volume(&self, volume: f32) {
        if let Ok(mut mixer) = self.mixer.lock() {
            mixer.master_volume = volume.clamp(0.0, 1.0);
        }
    }
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}
