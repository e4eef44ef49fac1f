//! Best-effort key-value store abstraction.
//!
//! Persistence here is never load-bearing: a read-only profile, a full
//! disk, or a missing home directory must not break the gate or the
//! gallery. The [`KvStore`] trait therefore has infallible
//! signatures; [`SqliteStore`] swallows backend errors and degrades to
//! an in-memory map, and [`MemoryStore`] backs session-scoped state.

use std::collections::HashMap;

use super::Database;

/// Well-known storage keys.
pub mod keys {
    /// JSON `LockState` record.
    pub const LOCK_STATE: &str = "gate.lock_state";
    /// `"1"` once the gate was unlocked this session.
    pub const SESSION_UNLOCK: &str = "gate.session_unlock";
    /// `"yes"` / `"no"`; absent until the consent prompt is answered.
    pub const MUSIC_CONSENT: &str = "music.consent";
    /// Stringified volume in `0.0..=1.0`.
    pub const MUSIC_VOLUME: &str = "music.volume";
    /// JSON gallery `ViewState` snapshot (CLI front-end only).
    pub const GALLERY_VIEW: &str = "gallery.view";
}

/// Durable-ish keyed string storage. All operations are best-effort and
/// never fail; a lost write leaves the experience fully usable.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

enum Backend {
    Db(Database),
    Memory(HashMap<String, String>),
}

/// SQLite-backed store that degrades to an in-memory map when the
/// database cannot be opened or written.
pub struct SqliteStore {
    backend: Backend,
}

impl SqliteStore {
    /// Open the profile store. Never fails: if the on-disk database is
    /// unavailable, state lives in memory for this process only.
    pub fn open() -> Self {
        let backend = match Database::open() {
            Ok(db) => Backend::Db(db),
            Err(_) => Backend::Memory(HashMap::new()),
        };
        Self { backend }
    }

    /// Wrap an already-open database (tests use `Database::open_memory`).
    pub fn with_database(db: Database) -> Self {
        Self {
            backend: Backend::Db(db),
        }
    }

    fn degrade(&mut self) -> &mut HashMap<String, String> {
        if let Backend::Db(_) = self.backend {
            self.backend = Backend::Memory(HashMap::new());
        }
        match &mut self.backend {
            Backend::Memory(map) => map,
            Backend::Db(_) => unreachable!(),
        }
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Option<String> {
        match &self.backend {
            Backend::Db(db) => db.kv_get(key).ok().flatten(),
            Backend::Memory(map) => map.get(key).cloned(),
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        let failed = match &self.backend {
            Backend::Db(db) => db.kv_set(key, value).is_err(),
            Backend::Memory(_) => false,
        };
        match &mut self.backend {
            Backend::Memory(map) => {
                map.insert(key.to_string(), value.to_string());
            }
            Backend::Db(_) if failed => {
                self.degrade().insert(key.to_string(), value.to_string());
            }
            Backend::Db(_) => {}
        }
    }

    fn remove(&mut self, key: &str) {
        match &mut self.backend {
            Backend::Db(db) => {
                let _ = db.kv_delete(key);
            }
            Backend::Memory(map) => {
                map.remove(key);
            }
        }
    }
}

/// Plain in-memory store: session-scoped state and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.map.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(keys::LOCK_STATE), None);
        store.set(keys::LOCK_STATE, "{}");
        assert_eq!(store.get(keys::LOCK_STATE).as_deref(), Some("{}"));
        store.remove(keys::LOCK_STATE);
        assert_eq!(store.get(keys::LOCK_STATE), None);
    }

    #[test]
    fn sqlite_store_over_memory_database() {
        let mut store = SqliteStore::with_database(Database::open_memory().unwrap());
        store.set(keys::MUSIC_VOLUME, "0.4");
        assert_eq!(store.get(keys::MUSIC_VOLUME).as_deref(), Some("0.4"));
        store.remove(keys::MUSIC_VOLUME);
        assert_eq!(store.get(keys::MUSIC_VOLUME), None);
    }
}
