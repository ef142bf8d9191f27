//! Audio system using Web Audio API
//!
//! Cues are procedurally generated - no sound files needed. Music tracks are
//! looping `<audio>` elements; the browser may refuse to start them, in which
//! case the failure is logged and the game carries on silently.

use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use super::{AudioError, AudioSink, MUSIC_VOLUME, MusicSlot, MusicTrack, SoundCue};

/// Frequencies (Hz) of each completion fanfare
const FANFARES: [[f32; 4]; 4] = [
    [400.0, 500.0, 600.0, 800.0],
    [523.0, 659.0, 784.0, 1047.0],
    [392.0, 494.0, 587.0, 784.0],
    [440.0, 554.0, 659.0, 880.0],
];

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    music: MusicSlot,
    element: Option<HtmlAudioElement>,
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
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("{} - cues disabled", AudioError::NoContext);
        }
        Self {
            ctx,
            music: MusicSlot::default(),
            element: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// First user gesture seen: resume the context and start queued music
    pub fn mark_ready(&mut self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
        if let Some(track) = self.music.mark_ready() {
            log::info!("Audio unlocked, starting {:?}", track);
            self.start_track(track);
        }
    }

    pub fn is_ready(&self) -> bool {
        self.music.is_ready()
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(el) = &self.element {
            el.set_muted(muted);
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective cue volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn start_track(&mut self, track: MusicTrack) {
        if let Err(e) = self.try_start_track(track) {
            log::warn!("Music {:?} failed to start: {}", track, e);
        }
    }

    fn try_start_track(&mut self, track: MusicTrack) -> Result<(), AudioError> {
        // Never let two loops overlap
        self.release_element();

        let path = track.asset_path();
        let el = HtmlAudioElement::new_with_src(path).map_err(|_| AudioError::Element(path))?;
        el.set_loop(true);
        el.set_volume(MUSIC_VOLUME as f64);
        el.set_muted(self.muted);

        let promise = el
            .play()
            .map_err(|e| AudioError::Rejected(format!("{:?}", e)))?;
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("Music {:?}: {}", track, AudioError::Rejected(format!("{:?}", e)));
            }
        });

        self.element = Some(el);
        Ok(())
    }

    fn release_element(&mut self) {
        if let Some(el) = self.element.take() {
            let _ = el.pause();
            el.set_current_time(0.0);
        }
    }

    // === Sound generators ===

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

    /// Bite - short square chomp, pitch varies by variant
    fn play_bite(&self, ctx: &AudioContext, vol: f32, variant: u8) {
        let freq = 180.0 + variant as f32 * 30.0;
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.frequency().set_value_at_time(freq, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(freq * 0.4, t + 0.08)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        // Crunch - second snap right after
        if let Some((osc, gain)) = self.create_osc(ctx, freq * 2.0, OscillatorType::Sawtooth) {
            let t2 = t + 0.06;
            gain.gain().set_value_at_time(vol * 0.15, t2).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t2 + 0.05)
                .ok();
            osc.start_with_when(t2).ok();
            osc.stop_with_when(t2 + 0.06).ok();
        }
    }

    /// Level complete - rising fanfare
    fn play_complete(&self, ctx: &AudioContext, vol: f32, variant: u8) {
        let notes = FANFARES[variant as usize % FANFARES.len()];
        for (i, freq) in notes.iter().enumerate() {
            let delay = i as f64 * 0.1;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.5).ok();
            }
        }
    }

    /// Portal - swirling drop
    fn play_portal(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 800.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.6)
                .ok();
            osc.frequency().set_value_at_time(800.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(80.0, t + 0.6)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.7).ok();
        }

        // Wobble layer
        if let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) {
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency().set_value_at_time(450.0, t + 0.1).ok();
            osc.frequency().set_value_at_time(250.0, t + 0.2).ok();
            osc.frequency().set_value_at_time(400.0, t + 0.3).ok();
            osc.frequency().set_value_at_time(200.0, t + 0.4).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.55).ok();
        }
    }
}

impl AudioSink for AudioManager {
    fn play_cue(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        // Synthesized stand-in for the cue's asset
        log::trace!("cue {:?} ({})", cue, cue.asset_path());
        match cue {
            SoundCue::Bite(variant) => self.play_bite(ctx, vol, variant),
            SoundCue::Complete(variant) => self.play_complete(ctx, vol, variant),
            SoundCue::Portal => self.play_portal(ctx, vol),
        }
    }

    fn play_music(&mut self, track: MusicTrack) {
        if let Some(track) = self.music.request(track) {
            self.start_track(track);
        } else {
            log::debug!("Music {:?} queued until first interaction", track);
        }
    }

    fn stop_music(&mut self) {
        self.music.stop();
        self.release_element();
    }
}
