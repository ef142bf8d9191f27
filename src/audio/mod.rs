//! Audio capability
//!
//! The simulation only names sounds; playing them is the host's job. The
//! browser implementation lives in `web` (wasm32 only). Everything here is
//! platform independent so the scene can be driven and tested natively.

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Number of bite cue variants
pub const BITE_VARIANTS: u8 = 7;
/// Number of level-complete cue variants
pub const COMPLETE_VARIANTS: u8 = 4;
/// Music plays at this fixed volume; master volume only scales cues
pub const MUSIC_VOLUME: f32 = 0.5;

const BITE_ASSETS: [&str; BITE_VARIANTS as usize] = [
    "/assets/bite-1.wav",
    "/assets/bite-2.wav",
    "/assets/bite-3.wav",
    "/assets/bite-4.wav",
    "/assets/bite-5.wav",
    "/assets/bite-6.wav",
    "/assets/bite-7.wav",
];

const COMPLETE_ASSETS: [&str; COMPLETE_VARIANTS as usize] = [
    "/assets/complete-1.mp3",
    "/assets/complete-2.mp3",
    "/assets/complete-3.mp3",
    "/assets/complete-4.mp3",
];

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Tooth collected (variant index)
    Bite(u8),
    /// Level complete fanfare (variant index)
    Complete(u8),
    /// Mouth went through the portal
    Portal,
}

impl SoundCue {
    /// Asset this cue identifies. Out-of-range variants wrap.
    pub fn asset_path(&self) -> &'static str {
        match *self {
            SoundCue::Bite(i) => BITE_ASSETS[(i % BITE_VARIANTS) as usize],
            SoundCue::Complete(i) => COMPLETE_ASSETS[(i % COMPLETE_VARIANTS) as usize],
            SoundCue::Portal => "/assets/portal.wav",
        }
    }
}

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Title,
    Game,
    Win,
}

impl MusicTrack {
    pub fn asset_path(&self) -> &'static str {
        match self {
            MusicTrack::Title => "/assets/Epicurean%20Stomp.mp3",
            MusicTrack::Game => "/assets/Heavy%20Wallet.mp3",
            MusicTrack::Win => "/assets/Taste%20The%20Sax.mp3",
        }
    }
}

/// Fire-and-forget audio. Implementations must never fail the caller.
pub trait AudioSink {
    fn play_cue(&mut self, cue: SoundCue);
    /// Start a looping track, replacing whatever is playing
    fn play_music(&mut self, track: MusicTrack);
    fn stop_music(&mut self);
}

/// Reasons a sound could not start. Logged, never propagated.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio context unavailable")]
    NoContext,

    #[error("could not create audio element for {0}")]
    Element(&'static str),

    #[error("playback rejected: {0}")]
    Rejected(String),
}

/// The single music handle: what was asked for, what is playing, and
/// whether the browser allows playback yet (it doesn't before the first
/// user gesture)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MusicSlot {
    ready: bool,
    requested: Option<MusicTrack>,
    playing: Option<MusicTrack>,
}

impl MusicSlot {
    /// Record a request. Returns the track to start now, or `None` while
    /// playback is still blocked.
    pub fn request(&mut self, track: MusicTrack) -> Option<MusicTrack> {
        self.requested = Some(track);
        if !self.ready {
            return None;
        }
        self.playing = Some(track);
        Some(track)
    }

    /// Playback is now allowed. Returns the queued track to start, if any.
    pub fn mark_ready(&mut self) -> Option<MusicTrack> {
        if self.ready {
            return None;
        }
        self.ready = true;
        self.playing = self.requested;
        self.requested
    }

    pub fn stop(&mut self) {
        self.requested = None;
        self.playing = None;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn playing(&self) -> Option<MusicTrack> {
        self.playing
    }
}

/// Sink for headless runs: remembers the music handle, plays nothing
#[derive(Debug, Default)]
pub struct SilentAudio {
    music: MusicSlot,
}

impl SilentAudio {
    pub fn new() -> Self {
        let mut music = MusicSlot::default();
        music.mark_ready();
        Self { music }
    }

    pub fn playing(&self) -> Option<MusicTrack> {
        self.music.playing()
    }
}

impl AudioSink for SilentAudio {
    fn play_cue(&mut self, cue: SoundCue) {
        log::trace!("cue {:?} ({})", cue, cue.asset_path());
    }

    fn play_music(&mut self, track: MusicTrack) {
        self.music.request(track);
    }

    fn stop_music(&mut self) {
        self.music.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_music_queued_until_ready() {
        let mut slot = MusicSlot::default();
        assert_eq!(slot.request(MusicTrack::Title), None);
        assert_eq!(slot.playing(), None);
        assert_eq!(slot.mark_ready(), Some(MusicTrack::Title));
        assert_eq!(slot.playing(), Some(MusicTrack::Title));
        // Only the first gesture counts
        assert_eq!(slot.mark_ready(), None);
    }

    #[test]
    fn test_latest_request_wins() {
        let mut slot = MusicSlot::default();
        slot.request(MusicTrack::Title);
        slot.request(MusicTrack::Game);
        assert_eq!(slot.mark_ready(), Some(MusicTrack::Game));
        assert_eq!(slot.request(MusicTrack::Win), Some(MusicTrack::Win));
        assert_eq!(slot.playing(), Some(MusicTrack::Win));
    }

    #[test]
    fn test_stop_clears_queue() {
        let mut slot = MusicSlot::default();
        slot.request(MusicTrack::Game);
        slot.stop();
        assert_eq!(slot.mark_ready(), None);
        assert!(slot.is_ready());
        assert_eq!(slot.playing(), None);
    }

    #[test]
    fn test_cue_asset_table() {
        let mut paths: Vec<&str> = (0..BITE_VARIANTS)
            .map(|i| SoundCue::Bite(i).asset_path())
            .chain((0..COMPLETE_VARIANTS).map(|i| SoundCue::Complete(i).asset_path()))
            .chain(std::iter::once(SoundCue::Portal.asset_path()))
            .collect();
        assert_eq!(SoundCue::Bite(0).asset_path(), "/assets/bite-1.wav");
        assert_eq!(SoundCue::Complete(3).asset_path(), "/assets/complete-4.mp3");
        assert_eq!(SoundCue::Portal.asset_path(), "/assets/portal.wav");

        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), (BITE_VARIANTS + COMPLETE_VARIANTS + 1) as usize);
    }

    #[test]
    fn test_cue_variant_wraps() {
        assert_eq!(SoundCue::Bite(7).asset_path(), SoundCue::Bite(0).asset_path());
        assert_eq!(SoundCue::Complete(9).asset_path(), SoundCue::Complete(1).asset_path());
    }

    #[test]
    fn test_music_volume_is_half() {
        assert_eq!(MUSIC_VOLUME, 0.5);
    }

    #[test]
    fn test_silent_audio_tracks_music() {
        let mut audio = SilentAudio::new();
        audio.play_music(MusicTrack::Game);
        assert_eq!(audio.playing(), Some(MusicTrack::Game));
        audio.play_cue(SoundCue::Portal);
        audio.stop_music();
        assert_eq!(audio.playing(), None);
    }
}
