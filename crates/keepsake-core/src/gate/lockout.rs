//! Failed-attempt count and cooldown expiry, persisted across sessions.
//!
//! Stored as a single JSON record under [`keys::LOCK_STATE`]. Reads are
//! defensive: malformed or missing data falls back to the default state,
//! and an expired `lock_until_ms` is normalized to 0 on read without
//! rewriting storage.

use serde::{Deserialize, Serialize};

use crate::storage::{keys, KvStore};

/// Persisted lockout record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockState {
    #[serde(default)]
    pub failed_attempts: u32,
    /// Epoch milliseconds; 0 (or anything in the past) means unlocked.
    #[serde(default)]
    pub lock_until_ms: i64,
}

impl LockState {
    /// Read from the store, normalizing expired locks to 0.
    pub fn read(store: &dyn KvStore, now_ms: i64) -> Self {
        let mut state = store
            .get(keys::LOCK_STATE)
            .and_then(|raw| serde_json::from_str::<LockState>(&raw).ok())
            .unwrap_or_default();
        state.lock_until_ms = state.lock_until_ms.max(0);
        if state.lock_until_ms <= now_ms {
            state.lock_until_ms = 0;
        }
        state
    }

    /// Persist. Best-effort: a failed write is silently absorbed.
    pub fn write(&self, store: &mut dyn KvStore) {
        if let Ok(json) = serde_json::to_string(self) {
            store.set(keys::LOCK_STATE, &json);
        }
    }

    /// Clear both the record and the store entry.
    pub fn reset(store: &mut dyn KvStore) {
        LockState::default().write(store);
    }

    pub fn is_locked(&self, now_ms: i64) -> bool {
        self.lock_until_ms > now_ms
    }

    pub fn remaining_ms(&self, now_ms: i64) -> i64 {
        (self.lock_until_ms - now_ms).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn missing_record_reads_as_default() {
        let store = MemoryStore::new();
        assert_eq!(LockState::read(&store, 0), LockState::default());
    }

    #[test]
    fn malformed_record_reads_as_default() {
        let mut store = MemoryStore::new();
        store.set(keys::LOCK_STATE, "not json at all");
        assert_eq!(LockState::read(&store, 0), LockState::default());
    }

    #[test]
    fn roundtrip_preserves_fields() {
        let mut store = MemoryStore::new();
        let state = LockState {
            failed_attempts: 3,
            lock_until_ms: 99_000,
        };
        state.write(&mut store);
        assert_eq!(LockState::read(&store, 50_000), state);
    }

    #[test]
    fn expired_lock_normalizes_without_rewriting() {
        let mut store = MemoryStore::new();
        LockState {
            failed_attempts: 2,
            lock_until_ms: 10_000,
        }
        .write(&mut store);

        let state = LockState::read(&store, 20_000);
        assert_eq!(state.lock_until_ms, 0);
        assert_eq!(state.failed_attempts, 2);

        // The stored record is untouched; only the in-memory view changed.
        let raw = store.get(keys::LOCK_STATE).unwrap();
        assert!(raw.contains("10000"));
    }

    #[test]
    fn reset_clears_counters() {
        let mut store = MemoryStore::new();
        LockState {
            failed_attempts: 3,
            lock_until_ms: 99_000,
        }
        .write(&mut store);
        LockState::reset(&mut store);
        assert_eq!(LockState::read(&store, 0), LockState::default());
    }

    #[test]
    fn remaining_and_locked() {
        let state = LockState {
            failed_attempts: 0,
            lock_until_ms: 30_000,
        };
        assert!(state.is_locked(29_999));
        assert!(!state.is_locked(30_000));
        assert_eq!(state.remaining_ms(10_000), 20_000);
        assert_eq!(state.remaining_ms(40_000), 0);
    }
}
