use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why a gate submission was turned away (reject half of
/// [`crate::error::GateError`], serializable for event output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RejectReason {
    Format,
    InvalidDate,
    Mismatch,
}

/// Modal navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

/// Every state change in the system produces an Event.
/// The front-end polls for events and renders them; tests assert on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A submission failed; the attempt was counted and persisted.
    AttemptRejected {
        reason: RejectReason,
        failed_attempts: u32,
        attempts_left: u32,
        hint_index: Option<usize>,
        at: DateTime<Utc>,
    },
    /// The failure threshold was reached; cooldown armed.
    GateLocked {
        lock_until_ms: i64,
        cooldown_ms: i64,
        at: DateTime<Utc>,
    },
    /// A submission arrived while the cooldown was still running.
    SubmitWhileLocked {
        remaining_ms: i64,
        at: DateTime<Utc>,
    },
    /// The cooldown elapsed; controls re-enabled.
    CooldownEnded {
        at: DateTime<Utc>,
    },
    /// The correct date was entered (or the session flag replayed it).
    GateUnlocked {
        /// True when replayed from the session flag (no transition cue).
        instant: bool,
        at: DateTime<Utc>,
    },
    ModalOpened {
        index: usize,
        total: usize,
        fragment: Option<String>,
        at: DateTime<Utc>,
    },
    ModalNavigated {
        from: usize,
        to: usize,
        direction: Direction,
        at: DateTime<Utc>,
    },
    ModalClosed {
        restored_fragment: Option<String>,
        at: DateTime<Utc>,
    },
    /// Tag filter changed; grid re-derived from the full catalog.
    FilterChanged {
        tag: Option<String>,
        matches: usize,
        at: DateTime<Utc>,
    },
    /// An externally-set fragment opened/retargeted/closed the modal.
    FragmentSynced {
        index: Option<usize>,
        at: DateTime<Utc>,
    },
    MusicStarted {
        src: String,
        at: DateTime<Utc>,
    },
    MusicPaused {
        at: DateTime<Utc>,
    },
    /// All configured audio sources were tried; staying silent.
    MusicUnavailable {
        attempted: usize,
        at: DateTime<Utc>,
    },
    ConsentRecorded {
        accepted: bool,
        at: DateTime<Utc>,
    },
    VolumeChanged {
        volume: f64,
        at: DateTime<Utc>,
    },
    LetterStarted {
        instant: bool,
        at: DateTime<Utc>,
    },
    LetterCompleted {
        at: DateTime<Utc>,
    },
}
