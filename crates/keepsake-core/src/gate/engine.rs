//! Gate state machine.
//!
//! Wall-clock based, no internal threads: the caller invokes `tick()`
//! periodically (sub-second granularity) while the cooldown runs.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Locked -> Idle
//! Idle -> Unlocked   (terminal for the session)
//! ```
//!
//! Every command returns an [`Event`]; rendering happens through the
//! injected [`GateSurface`]. Lockout state persists through the injected
//! [`KvStore`], so a reload lands back in the same cooldown.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GateError;
use crate::events::{Event, RejectReason};
use crate::storage::{keys, KvStore, UnlockConfig};

use super::lockout::LockState;
use super::password::parse_date_password;
use super::surface::GateSurface;

const MSG_LOCKED: &str = "Please wait for the cooldown to finish.";
const MSG_FORMAT: &str = "Enter the date as day, month, year.";
const MSG_INVALID_DATE: &str = "That is not a valid calendar date.";
const MSG_MISMATCH: &str = "Wrong date.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateStatus {
    Idle,
    Locked,
    Unlocked,
}

/// The date-password gate.
///
/// Owns the lockout record exclusively; everything else reads gate state
/// through the queries below.
pub struct GateEngine<K: KvStore, S: GateSurface> {
    target: Option<NaiveDate>,
    max_attempts: u32,
    cooldown_ms: i64,
    remember_session: bool,
    hints: Vec<String>,
    status: GateStatus,
    lock: LockState,
    /// Highest hint index shown so far. Never regresses.
    hint_cursor: Option<usize>,
    store: K,
    surface: S,
}

impl<K: KvStore, S: GateSurface> GateEngine<K, S> {
    /// Build the gate from config, reading any persisted lockout.
    pub fn new(unlock: &UnlockConfig, store: K, surface: S, now: DateTime<Utc>) -> Self {
        let lock = LockState::read(&store, now.timestamp_millis());
        let status = if lock.is_locked(now.timestamp_millis()) {
            GateStatus::Locked
        } else {
            GateStatus::Idle
        };
        Self {
            target: unlock.target_date(),
            max_attempts: unlock.max_attempts_before_cooldown,
            cooldown_ms: unlock.cooldown_ms,
            remember_session: unlock.remember_unlock_in_session,
            hints: unlock.hints.clone(),
            status,
            lock,
            hint_cursor: None,
            store,
            surface,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> GateStatus {
        self.status
    }

    pub fn failed_attempts(&self) -> u32 {
        self.lock.failed_attempts
    }

    pub fn attempts_left(&self) -> u32 {
        self.max_attempts.saturating_sub(self.lock.failed_attempts)
    }

    pub fn remaining_ms(&self, now: DateTime<Utc>) -> i64 {
        self.lock.remaining_ms(now.timestamp_millis())
    }

    /// The hint currently on display, if any.
    pub fn current_hint(&self) -> Option<&str> {
        self.hint_cursor
            .and_then(|i| self.hints.get(i))
            .map(String::as_str)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply persisted state on load: replay a remembered unlock, or
    /// re-arm the countdown if a cooldown is still running.
    pub fn bootstrap(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.remember_session
            && self.store.get(keys::SESSION_UNLOCK).as_deref() == Some("1")
        {
            return Some(self.unlock(true, now));
        }
        if self.lock.is_locked(now.timestamp_millis()) {
            self.status = GateStatus::Locked;
            self.surface.set_controls_enabled(false);
            self.surface
                .show_countdown(self.lock.remaining_ms(now.timestamp_millis()));
        } else {
            self.surface.set_controls_enabled(true);
        }
        None
    }

    /// Validate a raw submission.
    pub fn submit(&mut self, raw: &str, now: DateTime<Utc>) -> Event {
        let now_ms = now.timestamp_millis();

        if self.status == GateStatus::Unlocked {
            return Event::GateUnlocked { instant: true, at: now };
        }

        if self.lock.is_locked(now_ms) {
            self.status = GateStatus::Locked;
            let remaining_ms = self.lock.remaining_ms(now_ms);
            self.surface.show_error(MSG_LOCKED);
            self.surface.shake();
            self.surface.show_countdown(remaining_ms);
            return Event::SubmitWhileLocked { remaining_ms, at: now };
        }

        self.surface.clear_error();

        let candidate = match parse_date_password(raw) {
            Ok(candidate) => candidate,
            Err(GateError::Format) => {
                return self.register_failure(RejectReason::Format, now);
            }
            Err(_) => {
                return self.register_failure(RejectReason::InvalidDate, now);
            }
        };

        let matches = self.target.map(|t| candidate.matches(t)).unwrap_or(false);
        if !matches {
            return self.register_failure(RejectReason::Mismatch, now);
        }

        self.unlock(false, now)
    }

    /// Call periodically while `Locked`. Returns `Some(CooldownEnded)`
    /// once the cooldown elapses and controls are re-enabled.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.status != GateStatus::Locked {
            return None;
        }
        let remaining_ms = self.lock.remaining_ms(now.timestamp_millis());
        if remaining_ms > 0 {
            self.surface.show_countdown(remaining_ms);
            return None;
        }
        self.lock.lock_until_ms = 0;
        self.lock.write(&mut self.store);
        self.status = GateStatus::Idle;
        self.surface.hide_countdown();
        self.surface.set_controls_enabled(true);
        Some(Event::CooldownEnded { at: now })
    }

    /// Clear lockout and session unlock state (owner escape hatch).
    pub fn reset(&mut self) {
        LockState::reset(&mut self.store);
        self.lock = LockState::default();
        self.store.remove(keys::SESSION_UNLOCK);
        self.status = GateStatus::Idle;
        self.hint_cursor = None;
        self.surface.clear_error();
        self.surface.clear_hint();
        self.surface.hide_countdown();
        self.surface.set_controls_enabled(true);
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn unlock(&mut self, instant: bool, now: DateTime<Utc>) -> Event {
        LockState::reset(&mut self.store);
        self.lock = LockState::default();
        self.status = GateStatus::Unlocked;
        if self.remember_session {
            self.store.set(keys::SESSION_UNLOCK, "1");
        }
        self.surface.clear_error();
        self.surface.clear_hint();
        self.surface.hide_countdown();
        self.surface.reveal_content(instant);
        Event::GateUnlocked { instant, at: now }
    }

    fn register_failure(&mut self, reason: RejectReason, now: DateTime<Utc>) -> Event {
        let now_ms = now.timestamp_millis();
        self.lock.failed_attempts += 1;

        if !self.hints.is_empty() {
            let next = (self.lock.failed_attempts as usize - 1).min(self.hints.len() - 1);
            let cursor = self.hint_cursor.map_or(next, |c| c.max(next));
            self.hint_cursor = Some(cursor);
            self.surface.show_hint(&self.hints[cursor]);
        }

        let message = match reason {
            RejectReason::Format => MSG_FORMAT,
            RejectReason::InvalidDate => MSG_INVALID_DATE,
            RejectReason::Mismatch => MSG_MISMATCH,
        };

        let attempts_left = self.max_attempts.saturating_sub(self.lock.failed_attempts);
        if attempts_left == 0 {
            self.lock.failed_attempts = 0;
            self.lock.lock_until_ms = now_ms + self.cooldown_ms;
            self.lock.write(&mut self.store);
            self.status = GateStatus::Locked;
            self.surface.show_error(message);
            self.surface.shake();
            self.surface.set_controls_enabled(false);
            self.surface.show_countdown(self.cooldown_ms);
            return Event::GateLocked {
                lock_until_ms: self.lock.lock_until_ms,
                cooldown_ms: self.cooldown_ms,
                at: now,
            };
        }

        self.lock.write(&mut self.store);
        let plural = if attempts_left == 1 { "" } else { "s" };
        self.surface.show_error(&format!(
            "{message} {attempts_left} attempt{plural} left before cooldown."
        ));
        self.surface.shake();
        Event::AttemptRejected {
            reason,
            failed_attempts: self.lock.failed_attempts,
            attempts_left,
            hint_index: self.hint_cursor,
            at: now,
        }
    }
}
