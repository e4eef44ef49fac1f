//! TOML-based application configuration.
//!
//! Holds everything the page owner edits:
//! - The unlock target date (and the time-of-day the counters start from)
//! - Attempt/cooldown policy and the ordered hint list
//! - The photo catalog and tag vocabulary
//! - Timeline entries, letter lines, music sources
//!
//! Configuration is stored at `~/.config/keepsake/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::ConfigError;
use crate::gallery::PhotoItem;
use crate::music::MusicSource;

use super::data_dir;

/// Unlock gate configuration: the shared date secret and lockout policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockConfig {
    #[serde(default = "default_day")]
    pub day: u32,
    #[serde(default = "default_month")]
    pub month: u32,
    #[serde(default = "default_year")]
    pub year: i32,
    /// Time-of-day the together-for counter starts from. Ignored by the
    /// password comparison, which is date-only.
    #[serde(default = "default_hour")]
    pub hour: u32,
    #[serde(default = "default_minute")]
    pub minute: u32,
    #[serde(default = "default_second")]
    pub second: u32,
    #[serde(default = "default_max_attempts")]
    pub max_attempts_before_cooldown: u32,
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: i64,
    #[serde(default = "default_true")]
    pub remember_unlock_in_session: bool,
    /// Ordered hints, surfaced one further per failed attempt.
    #[serde(default = "default_hints")]
    pub hints: Vec<String>,
}

/// Gallery behavior knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Write/restore `#photo-<N>` fragments.
    #[serde(default = "default_true")]
    pub deep_link: bool,
    /// Minimum horizontal displacement for a swipe, logical pixels.
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold_px: f64,
    /// Modal fade-out duration; focus is restored after it elapses.
    #[serde(default = "default_close_transition_ms")]
    pub close_transition_ms: i64,
}

/// Letter typing effect configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterConfig {
    #[serde(default)]
    pub lines: Vec<String>,
    #[serde(default = "default_type_interval_ms")]
    pub type_interval_ms: i64,
}

/// Background music configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicConfig {
    /// Candidate sources, best first. Tried in support order at play time.
    #[serde(default = "default_music_sources")]
    pub sources: Vec<MusicSource>,
    #[serde(default = "default_volume")]
    pub default_volume: f64,
    #[serde(default = "default_true")]
    pub autoplay_after_consent: bool,
}

/// One dated entry on the memory timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineItem {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/keepsake/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub unlock: UnlockConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub letter: LetterConfig,
    #[serde(default)]
    pub music: MusicConfig,
    #[serde(default)]
    pub photos: Vec<PhotoItem>,
    #[serde(default)]
    pub timeline: Vec<TimelineItem>,
}

// Default functions
fn default_day() -> u32 {
    1
}
fn default_month() -> u32 {
    11
}
fn default_year() -> i32 {
    2025
}
fn default_hour() -> u32 {
    19
}
fn default_minute() -> u32 {
    17
}
fn default_second() -> u32 {
    10
}
fn default_max_attempts() -> u32 {
    4
}
fn default_cooldown_ms() -> i64 {
    30_000
}
fn default_true() -> bool {
    true
}
fn default_hints() -> Vec<String> {
    vec![
        "It is a date.".to_string(),
        "Day, month, then year.".to_string(),
        "The year is this decade.".to_string(),
    ]
}
fn default_swipe_threshold() -> f64 {
    50.0
}
fn default_close_transition_ms() -> i64 {
    260
}
fn default_type_interval_ms() -> i64 {
    22
}
fn default_volume() -> f64 {
    0.4
}
fn default_music_sources() -> Vec<MusicSource> {
    vec![
        MusicSource {
            src: "assets/audio/music.mp3".to_string(),
            mime: "audio/mpeg".to_string(),
        },
        MusicSource {
            src: "assets/audio/music.m4a".to_string(),
            mime: "audio/mp4".to_string(),
        },
    ]
}

impl Default for UnlockConfig {
    fn default() -> Self {
        Self {
            day: default_day(),
            month: default_month(),
            year: default_year(),
            hour: default_hour(),
            minute: default_minute(),
            second: default_second(),
            max_attempts_before_cooldown: default_max_attempts(),
            cooldown_ms: default_cooldown_ms(),
            remember_unlock_in_session: true,
            hints: default_hints(),
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            deep_link: true,
            swipe_threshold_px: default_swipe_threshold(),
            close_transition_ms: default_close_transition_ms(),
        }
    }
}

impl Default for LetterConfig {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            type_interval_ms: default_type_interval_ms(),
        }
    }
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            sources: default_music_sources(),
            default_volume: default_volume(),
            autoplay_after_consent: true,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            unlock: UnlockConfig::default(),
            gallery: GalleryConfig::default(),
            letter: LetterConfig::default(),
            music: MusicConfig::default(),
            photos: Vec::new(),
            timeline: Vec::new(),
        }
    }
}

impl UnlockConfig {
    /// The configured date as a calendar date, if it denotes one.
    pub fn target_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Full starting instant for the together-for counters.
    pub fn start_instant(&self) -> Option<NaiveDateTime> {
        self.target_date()?
            .and_hms_opt(self.hour, self.minute, self.second)
    }

    /// `DD.MM.YYYY` display form.
    pub fn display_date(&self) -> String {
        format!("{:02}.{:02}.{}", self.day, self.month, self.year)
    }
}

impl AppConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let invalid = |message: String| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message,
                };

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| {
                                    invalid(format!("cannot parse '{value}' as number"))
                                })?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    /// Where the config file lives.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be determined.
    pub fn path() -> Result<PathBuf, ConfigError> {
        data_dir()
            .map(|d| d.join("config.toml"))
            .map_err(|e| ConfigError::LoadFailed {
                path: PathBuf::from("~/.config/keepsake"),
                message: e.to_string(),
            })
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning the default on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist. Returns an error if the key
    /// is unknown or the value cannot be parsed into the existing shape.
    ///
    /// # Errors
    /// See [`ConfigError`].
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = AppConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.unlock.day, 1);
        assert_eq!(parsed.unlock.month, 11);
        assert_eq!(parsed.unlock.year, 2025);
        assert_eq!(parsed.unlock.cooldown_ms, 30_000);
        assert_eq!(parsed.gallery.close_transition_ms, 260);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("unlock.day").as_deref(), Some("1"));
        assert_eq!(
            cfg.get("unlock.max_attempts_before_cooldown").as_deref(),
            Some("4")
        );
        assert_eq!(cfg.get("gallery.deep_link").as_deref(), Some("true"));
        assert!(cfg.get("unlock.missing_key").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(AppConfig::default()).unwrap();
        AppConfig::set_json_value_by_path(&mut json, "unlock.cooldown_ms", "60000").unwrap();
        assert_eq!(
            AppConfig::get_json_value_by_path(&json, "unlock.cooldown_ms").unwrap(),
            &serde_json::Value::Number(60_000.into())
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(AppConfig::default()).unwrap();
        assert!(AppConfig::set_json_value_by_path(&mut json, "unlock.nope", "1").is_err());
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_type() {
        let mut json = serde_json::to_value(AppConfig::default()).unwrap();
        assert!(
            AppConfig::set_json_value_by_path(&mut json, "gallery.deep_link", "not_a_bool")
                .is_err()
        );
    }

    #[test]
    fn target_instant_matches_configured_fields() {
        let cfg = UnlockConfig::default();
        let start = cfg.start_instant().unwrap();
        assert_eq!(start.to_string(), "2025-11-01 19:17:10");
        assert_eq!(cfg.display_date(), "01.11.2025");
    }

    #[test]
    fn impossible_configured_date_yields_none() {
        let cfg = UnlockConfig {
            day: 31,
            month: 2,
            ..Default::default()
        };
        assert!(cfg.target_date().is_none());
    }
}
