//! Browser sound for the DX-Ball cues
//!
//! Every cue is synthesized with Web Audio oscillators; there are no sample
//! files.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::dxball::SoundCue;

/// One oscillator voice: frequency sweep plus a decaying gain envelope
#[derive(Debug, Clone, Copy)]
struct Voice {
    wave: OscillatorType,
    freq: f32,
    /// Sweep target; `None` holds the pitch
    end_freq: Option<f32>,
    gain: f32,
    secs: f64,
    delay: f64,
}

impl Voice {
    const fn new(wave: OscillatorType, freq: f32, gain: f32, secs: f64) -> Self {
        Self {
            wave,
            freq,
            end_freq: None,
            gain,
            secs,
            delay: 0.0,
        }
    }

    const fn sweep(mut self, to: f32) -> Self {
        self.end_freq = Some(to);
        self
    }

    const fn after(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }
}

/// Rising arpeggio of `freqs`, `step` seconds apart
fn arpeggio(freqs: &[f32], wave: OscillatorType, gain: f32, step: f64) -> Vec<Voice> {
    freqs
        .iter()
        .enumerate()
        .map(|(i, &f)| Voice::new(wave, f, gain, 0.2).after(i as f64 * step))
        .collect()
}

fn voices(cue: SoundCue) -> Vec<Voice> {
    use OscillatorType::{Sawtooth, Sine, Square, Triangle};
    match cue {
        SoundCue::Paddle => vec![Voice::new(Sine, 150.0, 0.6, 0.15).sweep(60.0)],
        SoundCue::Wall => vec![Voice::new(Sine, 400.0, 0.3, 0.1)],
        SoundCue::Brick => vec![
            Voice::new(Triangle, 700.0, 0.3, 0.12).sweep(350.0),
            Voice::new(Sine, 90.0, 0.25, 0.1),
        ],
        SoundCue::Lose => vec![Voice::new(Sine, 300.0, 0.4, 0.8).sweep(40.0)],
        SoundCue::Pew => vec![Voice::new(Square, 1400.0, 0.15, 0.1).sweep(500.0)],
        SoundCue::ExtraLife => arpeggio(&[600.0, 800.0, 1000.0, 1200.0], Sine, 0.25, 0.07),
        SoundCue::Speed => vec![Voice::new(Sawtooth, 200.0, 0.2, 0.25).sweep(900.0)],
        SoundCue::Wide => arpeggio(&[400.0, 500.0, 600.0], Triangle, 0.25, 0.06),
        SoundCue::Shrink => arpeggio(&[600.0, 500.0, 400.0], Triangle, 0.25, 0.06),
        SoundCue::Through => vec![
            Voice::new(Sine, 600.0, 0.3, 0.4).sweep(200.0),
            Voice::new(Sine, 900.0, 0.15, 0.3).after(0.05),
        ],
        SoundCue::Fireball => vec![
            Voice::new(Sawtooth, 100.0, 0.4, 0.4).sweep(30.0),
            Voice::new(Square, 1500.0, 0.15, 0.12),
        ],
        SoundCue::Shoot => arpeggio(&[800.0, 1200.0], Square, 0.15, 0.05),
    }
}

/// Audio manager for the games
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Fails outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn play(&self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        for voice in voices(cue) {
            self.play_voice(ctx, voice, vol);
        }
    }

    pub fn play_all(&self, cues: &[SoundCue]) {
        for &cue in cues {
            self.play(cue);
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn play_voice(&self, ctx: &AudioContext, voice: Voice, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, voice.freq, voice.wave) else {
            return;
        };
        let t = ctx.current_time() + voice.delay;

        gain.gain().set_value_at_time(vol * voice.gain, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + voice.secs * 0.8)
            .ok();
        if let Some(to) = voice.end_freq {
            osc.frequency().set_value_at_time(voice.freq, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + voice.secs * 0.8)
                .ok();
        }

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + voice.secs).ok();
    }
}
