//! Terminal implementations of the core surface traits. Each engine
//! callback becomes a printed line; state the engine queries back
//! (fragment, focus order) is held in plain fields.

use keepsake_core::gallery::{GallerySurface, ImageSource, PhotoItem};
use keepsake_core::gate::GateSurface;
use keepsake_core::music::AudioPort;

#[derive(Default)]
pub struct TerminalGateSurface;

impl GateSurface for TerminalGateSurface {
    fn show_error(&mut self, message: &str) {
        println!("message: {message}");
    }
    fn show_hint(&mut self, hint: &str) {
        println!("hint: {hint}");
    }
    fn show_countdown(&mut self, remaining_ms: i64) {
        println!(
            "cooldown: {}s left",
            remaining_ms / 1000 + (remaining_ms % 1000 > 0) as i64
        );
    }
    fn reveal_content(&mut self, instant: bool) {
        if instant {
            println!("unlocked (remembered)");
        } else {
            println!("unlocked");
        }
    }
}

#[derive(Default)]
pub struct TerminalGallerySurface {
    pub fragment: Option<String>,
}

impl GallerySurface for TerminalGallerySurface {
    fn render_grid(&mut self, entries: &[(usize, &PhotoItem)]) {
        println!("{} photo(s)", entries.len());
        for (index, item) in entries {
            if item.caption.is_empty() {
                println!("  {}. {}", index + 1, item.src);
            } else {
                println!("  {}. {} - {}", index + 1, item.src, item.caption);
            }
        }
    }
    fn render_empty_message(&mut self, message: &str) {
        println!("{message}");
    }
    fn show_photo(&mut self, _index: usize, _item: &PhotoItem, chain: &[ImageSource]) {
        println!("showing: {}", chain[0].src);
    }
    fn set_caption(&mut self, caption: &str) {
        if !caption.is_empty() {
            println!("caption: {caption}");
        }
    }
    fn set_counter(&mut self, current: usize, total: usize) {
        println!("photo {current}/{total}");
    }
    fn current_fragment(&self) -> Option<String> {
        self.fragment.clone()
    }
    fn set_fragment(&mut self, fragment: Option<&str>) {
        self.fragment = fragment.map(|f| f.to_string());
        match &self.fragment {
            Some(f) => println!("fragment: #{f}"),
            None => println!("fragment cleared"),
        }
    }
}

#[derive(Default)]
pub struct TerminalAudioPort;

impl AudioPort for TerminalAudioPort {
    fn play(&mut self, src: &str, volume: f64) -> Result<(), keepsake_core::MediaError> {
        println!("playing {src} at volume {volume}");
        Ok(())
    }
    fn pause(&mut self) {
        println!("paused");
    }
}
