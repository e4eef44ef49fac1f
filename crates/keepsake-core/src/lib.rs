//! # Keepsake Core Library
//!
//! This library provides the core logic for Keepsake, a date-locked
//! photo keepsake. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any GUI
//! being a thin surface layer over the same core library.
//!
//! ## Architecture
//!
//! - **Gate**: A date-password state machine with persisted lockout and
//!   a wall-clock cooldown; the caller periodically invokes `tick()`
//! - **Gallery**: Tag-filtered photo grid plus a modal viewer with
//!   wraparound navigation, deep links, and image source negotiation
//! - **Storage**: SQLite-backed key/value state and TOML configuration
//! - **Ambient pieces**: relationship duration math, the letter typing
//!   effect, consent-gated music, and the unlock petal burst
//!
//! Presentation is decoupled through surface traits ([`GateSurface`],
//! [`GallerySurface`], [`AudioPort`]); engines hold the state and call
//! the surface on every transition.
//!
//! ## Key Components
//!
//! - [`GateEngine`]: Idle/Locked/Unlocked state machine over the date password
//! - [`GalleryEngine`]: grid, modal, fragments, and focus handling
//! - [`Database`] / [`AppConfig`]: persistence
//! - [`Event`]: every observable state change, as serializable data

pub mod duration;
pub mod error;
pub mod events;
pub mod gallery;
pub mod gate;
pub mod letter;
pub mod music;
pub mod petals;
pub mod storage;

pub use error::{ConfigError, CoreError, GateError, MediaError, StorageError};
pub use events::{Direction, Event, RejectReason};
pub use gallery::{Catalog, FormatSupport, GalleryEngine, GalleryKey, GallerySurface, PhotoItem};
pub use gate::{GateEngine, GateStatus, GateSurface, LockState};
pub use letter::LetterEngine;
pub use music::{AudioPort, MusicPlayer, MusicSource};
pub use storage::{AppConfig, Database, KvStore, MemoryStore, SqliteStore};
