use chrono::Utc;
use clap::Subcommand;
use keepsake_core::storage::{AppConfig, SqliteStore};
use keepsake_core::GateEngine;

use crate::surfaces::TerminalGateSurface;

#[derive(Subcommand)]
pub enum GateAction {
    /// Submit a date password (digits, any separators)
    Submit {
        /// The password attempt
        password: String,
    },
    /// Print current gate state as JSON
    Status,
    /// Clear lockout and session unlock state
    Reset,
}

pub fn run(action: GateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_or_default();
    let store = SqliteStore::open();
    let now = Utc::now();
    let mut gate = GateEngine::new(&config.unlock, store, TerminalGateSurface, now);

    match action {
        GateAction::Submit { password } => {
            if let Some(event) = gate.bootstrap(now) {
                // Session flag replayed the unlock; nothing to submit.
                println!("{}", serde_json::to_string_pretty(&event)?);
                return Ok(());
            }
            let event = gate.submit(&password, now);
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        GateAction::Status => {
            // Tick first so an elapsed cooldown is reflected.
            let ended = gate.tick(now);
            let snapshot = serde_json::json!({
                "status": gate.status(),
                "failed_attempts": gate.failed_attempts(),
                "attempts_left": gate.attempts_left(),
                "remaining_ms": gate.remaining_ms(now),
                "hint": gate.current_hint(),
            });
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            if let Some(event) = ended {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        GateAction::Reset => {
            gate.reset();
            println!("{{\"type\": \"gate_reset\"}}");
        }
    }

    Ok(())
}
