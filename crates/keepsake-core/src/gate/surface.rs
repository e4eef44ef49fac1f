//! Port between the gate engine and whatever renders it.
//!
//! The engine calls these on every transition; implementations map them
//! onto their UI (DOM classes, terminal lines, nothing at all). Every
//! method has a no-op default, so a surface implements only what it
//! can show.

/// Rendering surface for the gate.
pub trait GateSurface {
    fn show_error(&mut self, _message: &str) {}
    fn clear_error(&mut self) {}
    /// Hints never regress; the engine only calls this with the same or
    /// a later hint than the previous call.
    fn show_hint(&mut self, _hint: &str) {}
    fn clear_hint(&mut self) {}
    /// Visual rejection cue.
    fn shake(&mut self) {}
    fn set_controls_enabled(&mut self, _enabled: bool) {}
    fn show_countdown(&mut self, _remaining_ms: i64) {}
    fn hide_countdown(&mut self) {}
    /// Unlock side-effect: reveal the main content. `instant` replays a
    /// remembered unlock without the transition cue.
    fn reveal_content(&mut self, _instant: bool) {}
}

/// Inert stub used when no UI surface is wired up.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopGateSurface;

impl GateSurface for NoopGateSurface {}
