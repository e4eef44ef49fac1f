//! Port between the gallery engine and whatever renders it.
//!
//! Same shape as the gate surface: every method defaults to a no-op so
//! a surface implements only the pieces it can show. The engine never
//! touches presentation directly; fragments, focus, and scroll locking
//! all flow through here.

use super::catalog::PhotoItem;
use super::sources::ImageSource;

/// Rendering surface for the gallery.
pub trait GallerySurface {
    /// Whether the required rendering targets exist at all. `false`
    /// puts the engine into its inert mode.
    fn is_available(&self) -> bool {
        true
    }

    /// Render the filtered grid. Entries carry their catalog index so
    /// the surface can wire click-to-open back to `open`.
    fn render_grid(&mut self, _entries: &[(usize, &PhotoItem)]) {}
    /// Shown instead of the grid when nothing matches (or the catalog
    /// is empty).
    fn render_empty_message(&mut self, _message: &str) {}

    fn show_modal(&mut self) {}
    fn hide_modal(&mut self) {}
    /// Swap the modal to this photo; the surface walks `chain` on load
    /// failures.
    fn show_photo(&mut self, _index: usize, _item: &PhotoItem, _chain: &[ImageSource]) {}
    fn set_caption(&mut self, _caption: &str) {}
    fn set_counter(&mut self, _current: usize, _total: usize) {}
    /// Fire-and-forget warm-up of a neighbor. A stale preload is
    /// harmless; surfaces never surface its failures.
    fn preload(&mut self, _index: usize, _chain: &[ImageSource]) {}

    /// Current URL fragment, without the leading `#`.
    fn current_fragment(&self) -> Option<String> {
        None
    }
    /// Replace the fragment without adding a history entry. `None`
    /// clears it.
    fn set_fragment(&mut self, _fragment: Option<&str>) {}

    fn capture_focus(&mut self) {}
    fn restore_focus(&mut self) {}
    fn focus_close_control(&mut self) {}
    fn lock_scroll(&mut self) {}
    fn unlock_scroll(&mut self) {}

    /// Focus-trap introspection: how many focusable descendants the
    /// modal has, and which of them (by position) holds focus.
    fn focusable_count(&self) -> usize {
        0
    }
    fn focused_index(&self) -> Option<usize> {
        None
    }
    fn focus_item(&mut self, _index: usize) {}
}

/// Inert stub used when no UI surface is wired up.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopGallerySurface;

impl GallerySurface for NoopGallerySurface {}
