use chrono::Utc;
use clap::Subcommand;
use keepsake_core::storage::{AppConfig, SqliteStore};
use keepsake_core::MusicPlayer;

use crate::surfaces::TerminalAudioPort;

#[derive(Subcommand)]
pub enum MusicAction {
    /// Record the consent answer ("yes" or "no")
    Consent {
        /// "yes" to accept, "no" to decline
        answer: String,
    },
    /// Start playback
    Play,
    /// Pause playback
    Pause,
    /// Set the volume (0.0 to 1.0)
    Volume {
        /// New volume
        volume: f64,
    },
    /// Print consent and volume as JSON
    Status,
}

pub fn run(action: MusicAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_or_default();
    let store = SqliteStore::open();
    let mut player = MusicPlayer::new(config.music, store, TerminalAudioPort);
    let now = Utc::now();

    match action {
        MusicAction::Consent { answer } => {
            let accepted = match answer.as_str() {
                "yes" => true,
                "no" => false,
                other => return Err(format!("expected \"yes\" or \"no\", got \"{other}\"").into()),
            };
            for event in player.record_consent(accepted, now) {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        MusicAction::Play => {
            let event = player.play(now);
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        MusicAction::Pause => {
            let event = player.pause(now);
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        MusicAction::Volume { volume } => {
            let event = player.set_volume(volume, now);
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        MusicAction::Status => {
            let snapshot = serde_json::json!({
                "consent": player.consent(),
                "volume": player.volume(),
            });
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }

    Ok(())
}
