//! The letter typing effect: reveal the configured lines one character
//! at a time on a caller-driven tick.
//!
//! The engine never sleeps; `tick` catches up on however many
//! characters the elapsed wall-clock time covers. Under reduced motion
//! the full text appears at once.

use chrono::{DateTime, Utc};

use crate::events::Event;
use crate::storage::config::LetterConfig;

pub struct LetterEngine {
    chars: Vec<char>,
    interval_ms: i64,
    reduce_motion: bool,
    revealed: usize,
    running: bool,
    completed_emitted: bool,
    /// Epoch ms at which the next character appears.
    next_at_ms: i64,
}

impl LetterEngine {
    pub fn new(config: &LetterConfig, reduce_motion: bool) -> Self {
        Self {
            chars: config.lines.join("\n").chars().collect(),
            interval_ms: config.type_interval_ms.max(1),
            reduce_motion,
            revealed: 0,
            running: false,
            completed_emitted: false,
            next_at_ms: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// The text revealed so far.
    pub fn visible(&self) -> String {
        self.chars[..self.revealed].iter().collect()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_complete(&self) -> bool {
        self.revealed == self.chars.len()
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Start (or restart) the reveal. A restart discards any progress
    /// and schedule from the previous run.
    pub fn start(&mut self, now: DateTime<Utc>) -> Event {
        self.completed_emitted = false;
        let instant = self.reduce_motion || self.chars.is_empty();
        if instant {
            self.revealed = self.chars.len();
            self.running = false;
        } else {
            self.revealed = 0;
            self.running = true;
            self.next_at_ms = now.timestamp_millis() + self.interval_ms;
        }
        Event::LetterStarted { instant, at: now }
    }

    /// Reveal everything immediately.
    pub fn skip(&mut self) {
        self.revealed = self.chars.len();
        self.running = false;
    }

    /// Advance the reveal to wherever the clock says it should be.
    /// Emits [`Event::LetterCompleted`] exactly once, on the tick that
    /// finds the text fully revealed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.running {
            let now_ms = now.timestamp_millis();
            while self.revealed < self.chars.len() && now_ms >= self.next_at_ms {
                self.revealed += 1;
                self.next_at_ms += self.interval_ms;
            }
            if self.revealed == self.chars.len() {
                self.running = false;
            }
        }
        if self.is_complete() && !self.completed_emitted {
            self.completed_emitted = true;
            return Some(Event::LetterCompleted { at: now });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_ms(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_760_000_000_000 + ms).single().unwrap()
    }

    fn config(lines: &[&str]) -> LetterConfig {
        LetterConfig {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            type_interval_ms: 10,
        }
    }

    #[test]
    fn reveals_one_char_per_interval() {
        let mut letter = LetterEngine::new(&config(&["hi"]), false);
        letter.start(at_ms(0));
        assert_eq!(letter.visible(), "");

        assert!(letter.tick(at_ms(5)).is_none());
        assert_eq!(letter.visible(), "");
        letter.tick(at_ms(10));
        assert_eq!(letter.visible(), "h");
        let event = letter.tick(at_ms(20));
        assert_eq!(letter.visible(), "hi");
        assert!(matches!(event, Some(Event::LetterCompleted { .. })));
    }

    #[test]
    fn catches_up_after_a_long_gap() {
        let mut letter = LetterEngine::new(&config(&["hello"]), false);
        letter.start(at_ms(0));
        letter.tick(at_ms(30));
        assert_eq!(letter.visible(), "hel");
        letter.tick(at_ms(1000));
        assert_eq!(letter.visible(), "hello");
    }

    #[test]
    fn lines_join_with_newlines() {
        let mut letter = LetterEngine::new(&config(&["ab", "cd"]), false);
        letter.start(at_ms(0));
        letter.tick(at_ms(1000));
        assert_eq!(letter.visible(), "ab\ncd");
    }

    #[test]
    fn reduced_motion_reveals_instantly() {
        let mut letter = LetterEngine::new(&config(&["hello"]), true);
        let event = letter.start(at_ms(0));
        assert!(matches!(event, Event::LetterStarted { instant: true, .. }));
        assert_eq!(letter.visible(), "hello");
        assert!(matches!(
            letter.tick(at_ms(0)),
            Some(Event::LetterCompleted { .. })
        ));
    }

    #[test]
    fn restart_discards_the_previous_schedule() {
        let mut letter = LetterEngine::new(&config(&["hello"]), false);
        letter.start(at_ms(0));
        letter.tick(at_ms(30));
        assert_eq!(letter.visible(), "hel");

        letter.start(at_ms(100));
        assert_eq!(letter.visible(), "");
        letter.tick(at_ms(110));
        assert_eq!(letter.visible(), "h");
    }

    #[test]
    fn completion_event_fires_once() {
        let mut letter = LetterEngine::new(&config(&["a"]), false);
        letter.start(at_ms(0));
        assert!(letter.tick(at_ms(10)).is_some());
        assert!(letter.tick(at_ms(20)).is_none());
        assert!(letter.tick(at_ms(30)).is_none());
    }

    #[test]
    fn skip_reveals_everything() {
        let mut letter = LetterEngine::new(&config(&["hello"]), false);
        letter.start(at_ms(0));
        letter.skip();
        assert_eq!(letter.visible(), "hello");
        assert!(!letter.is_running());
        assert!(matches!(
            letter.tick(at_ms(5)),
            Some(Event::LetterCompleted { .. })
        ));
    }

    #[test]
    fn empty_letter_is_instantly_complete() {
        let mut letter = LetterEngine::new(&config(&[]), false);
        let event = letter.start(at_ms(0));
        assert!(matches!(event, Event::LetterStarted { instant: true, .. }));
        assert!(letter.is_complete());
    }
}
