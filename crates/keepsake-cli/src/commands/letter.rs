use std::io::Write;

use chrono::Utc;
use keepsake_core::storage::AppConfig;
use keepsake_core::LetterEngine;

/// Type the letter out at the configured pace. `instant` behaves like
/// a reduced-motion environment: the whole text at once.
pub fn run(instant: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_or_default();
    let interval_ms = config.letter.type_interval_ms.max(1) as u64;
    let mut letter = LetterEngine::new(&config.letter, instant);
    letter.start(Utc::now());

    let mut stdout = std::io::stdout();
    let mut printed = 0;
    loop {
        let visible = letter.visible();
        write!(stdout, "{}", &visible[printed..])?;
        stdout.flush()?;
        printed = visible.len();

        if letter.tick(Utc::now()).is_some() {
            let visible = letter.visible();
            write!(stdout, "{}", &visible[printed..])?;
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(interval_ms));
    }
    writeln!(stdout)?;
    Ok(())
}
