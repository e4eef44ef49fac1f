//! Background music: consent gating, source negotiation, and volume.
//!
//! Playback itself lives behind [`AudioPort`]; the player decides which
//! source to hand it. Sources are tried in configured order, skipping
//! MIME types the environment cannot decode, and a source that fails at
//! play time is never retried within the attempt. When every source is
//! exhausted the player stays silent instead of erroring the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MediaError;
use crate::events::Event;
use crate::storage::config::MusicConfig;
use crate::storage::{keys, KvStore};

/// One candidate audio source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicSource {
    pub src: String,
    pub mime: String,
}

/// Playback backend. Implementations map onto an `<audio>` element, a
/// native audio stack, or nothing at all.
pub trait AudioPort {
    /// Whether this environment can decode the given MIME type.
    fn can_play(&self, _mime: &str) -> bool {
        true
    }
    /// Start playback from `src`. An `Err` means this source failed;
    /// the player moves on to the next candidate.
    fn play(&mut self, _src: &str, _volume: f64) -> Result<(), MediaError> {
        Ok(())
    }
    fn pause(&mut self) {}
    fn set_volume(&mut self, _volume: f64) {}
}

/// Inert stub used when no audio backend is wired up.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAudioPort;

impl AudioPort for NoopAudioPort {}

const CONSENT_YES: &str = "yes";
const CONSENT_NO: &str = "no";

pub struct MusicPlayer<K: KvStore, A: AudioPort> {
    config: MusicConfig,
    store: K,
    audio: A,
    playing: bool,
    current_src: Option<String>,
    volume: f64,
}

impl<K: KvStore, A: AudioPort> MusicPlayer<K, A> {
    pub fn new(config: MusicConfig, store: K, audio: A) -> Self {
        let volume = store
            .get(keys::MUSIC_VOLUME)
            .and_then(|raw| raw.parse::<f64>().ok())
            .unwrap_or(config.default_volume)
            .clamp(0.0, 1.0);
        Self {
            config,
            store,
            audio,
            playing: false,
            current_src: None,
            volume,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_src(&self) -> Option<&str> {
        self.current_src.as_deref()
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Remembered consent: `Some(true)` accepted, `Some(false)`
    /// declined, `None` never asked.
    pub fn consent(&self) -> Option<bool> {
        match self.store.get(keys::MUSIC_CONSENT).as_deref() {
            Some(CONSENT_YES) => Some(true),
            Some(CONSENT_NO) => Some(false),
            _ => None,
        }
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Record the consent answer. Accepting may also start playback,
    /// depending on configuration.
    pub fn record_consent(&mut self, accepted: bool, now: DateTime<Utc>) -> Vec<Event> {
        self.store.set(
            keys::MUSIC_CONSENT,
            if accepted { CONSENT_YES } else { CONSENT_NO },
        );
        let mut events = vec![Event::ConsentRecorded { accepted, at: now }];
        if accepted && self.config.autoplay_after_consent {
            events.push(self.play(now));
        }
        events
    }

    /// Try the configured sources in order and start the first that
    /// works. Exhaustion is reported as an event, not an error; the
    /// player simply stays silent.
    pub fn play(&mut self, now: DateTime<Utc>) -> Event {
        match self.try_sources() {
            Ok(src) => {
                self.playing = true;
                self.current_src = Some(src.clone());
                Event::MusicStarted { src, at: now }
            }
            Err(MediaError::NoPlayableSource { attempted }) => Event::MusicUnavailable {
                attempted: attempted.len(),
                at: now,
            },
            Err(_) => Event::MusicUnavailable { attempted: 0, at: now },
        }
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> Event {
        self.audio.pause();
        self.playing = false;
        Event::MusicPaused { at: now }
    }

    pub fn toggle(&mut self, now: DateTime<Utc>) -> Event {
        if self.playing {
            self.pause(now)
        } else {
            self.play(now)
        }
    }

    /// Clamp to `0.0..=1.0`, apply, and persist.
    pub fn set_volume(&mut self, volume: f64, now: DateTime<Utc>) -> Event {
        self.volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            self.config.default_volume.clamp(0.0, 1.0)
        };
        self.audio.set_volume(self.volume);
        self.store.set(keys::MUSIC_VOLUME, &self.volume.to_string());
        Event::VolumeChanged {
            volume: self.volume,
            at: now,
        }
    }

    fn try_sources(&mut self) -> Result<String, MediaError> {
        let mut attempted = Vec::new();
        for source in self.config.sources.clone() {
            attempted.push(source.src.clone());
            if !self.audio.can_play(&source.mime) {
                continue;
            }
            if self.audio.play(&source.src, self.volume).is_ok() {
                return Ok(source.src);
            }
        }
        Err(MediaError::NoPlayableSource { attempted })
    }
}
