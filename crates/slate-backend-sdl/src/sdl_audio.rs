//! Synthesized sound cues over SDL2 audio.
//!
//! No audio assets: each cue is a short square-wave burst rendered by the
//! audio callback. `play` only flips shared synth state, so it never blocks
//! the frame loop.

use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

use slate_platform::{SoundCue, SoundService};
use slate_types::error::{Result, SlateError};

/// Square-wave burst synthesizer driven by the audio thread.
struct CueSynth {
    sample_rate: f32,
    phase: f32,
    freq: f32,
    volume: f32,
    remaining: usize,
}

impl AudioCallback for CueSynth {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            if self.remaining > 0 {
                *sample = if self.phase < 0.5 {
                    self.volume
                } else {
                    -self.volume
                };
                self.phase = (self.phase + self.freq / self.sample_rate).fract();
                self.remaining -= 1;
            } else {
                *sample = 0.0;
            }
        }
    }
}

/// Fire-and-forget cue player.
pub struct SdlSound {
    device: AudioDevice<CueSynth>,
    sample_rate: f32,
}

impl SdlSound {
    /// Open the default audio device and start the (silent) synth.
    pub fn new() -> Result<Self> {
        let sdl = sdl2::init().map_err(SlateError::Backend)?;
        let audio = sdl.audio().map_err(SlateError::Backend)?;
        let desired = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: Some(256),
        };
        let mut sample_rate = 44_100.0;
        let device = audio
            .open_playback(None, &desired, |spec| {
                sample_rate = spec.freq as f32;
                CueSynth {
                    sample_rate,
                    phase: 0.0,
                    freq: 880.0,
                    volume: 0.12,
                    remaining: 0,
                }
            })
            .map_err(SlateError::Backend)?;
        device.resume();
        log::info!("SDL2 audio cues ready ({sample_rate} Hz)");
        Ok(Self {
            device,
            sample_rate,
        })
    }
}

impl SoundService for SdlSound {
    fn play(&mut self, cue: SoundCue) {
        let (freq, millis) = match cue {
            SoundCue::KeyClick => (1_200.0, 25u32),
            SoundCue::Notify => (880.0, 120),
        };
        let mut synth = self.device.lock();
        synth.freq = freq;
        synth.phase = 0.0;
        synth.remaining = (self.sample_rate * millis as f32 / 1000.0) as usize;
    }
}
