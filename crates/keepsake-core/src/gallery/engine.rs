//! The gallery engine: filterable grid plus a modal viewer with
//! wraparound navigation, deep links, and a caller-driven tick for the
//! deferred focus restore.
//!
//! All presentation flows through [`GallerySurface`]; the engine owns
//! the view state and the fragment protocol. Operations take `now`
//! explicitly so tests run on a fixed clock.

use chrono::{DateTime, Utc};

use super::catalog::{Catalog, PhotoItem};
use super::fragment::{format_fragment, parse_fragment};
use super::sources::{fallback_chain, FormatSupport, ImageSource};
use super::surface::GallerySurface;
use crate::events::{Direction, Event};
use crate::storage::config::GalleryConfig;

pub(crate) const MSG_EMPTY_CATALOG: &str = "No photos yet.";
pub(crate) const MSG_EMPTY_FILTER: &str = "No photos match this filter.";

/// Keys the engine reacts to while the modal is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryKey {
    Escape,
    ArrowRight,
    ArrowLeft,
    Tab { shift: bool },
}

/// Serializable snapshot of the view, for callers that persist it
/// between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ViewState {
    #[serde(default)]
    pub current_index: usize,
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub active_tag: Option<String>,
    #[serde(default)]
    pub filtered: Vec<usize>,
}

pub struct GalleryEngine<S: GallerySurface> {
    catalog: Catalog,
    config: GalleryConfig,
    support: FormatSupport,
    view: ViewState,
    /// Fragment present before the modal opened, restored on close.
    restore_fragment: Option<String>,
    /// Deadline (epoch ms) after which focus returns to the grid.
    pending_close_at: Option<i64>,
    inert: bool,
    surface: S,
}

impl<S: GallerySurface> GalleryEngine<S> {
    pub fn new(catalog: Catalog, config: GalleryConfig, support: FormatSupport, mut surface: S) -> Self {
        let inert = !surface.is_available() || catalog.is_empty();
        if inert {
            if surface.is_available() {
                surface.render_empty_message(MSG_EMPTY_CATALOG);
            }
            return Self {
                catalog,
                config,
                support,
                view: ViewState::default(),
                restore_fragment: None,
                pending_close_at: None,
                inert,
                surface,
            };
        }
        let filtered = catalog.indices_with_tag(None);
        let mut engine = Self {
            catalog,
            config,
            support,
            view: ViewState {
                filtered,
                ..ViewState::default()
            },
            restore_fragment: None,
            pending_close_at: None,
            inert,
            surface,
        };
        engine.render_grid();
        engine
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_open(&self) -> bool {
        self.view.is_open
    }

    pub fn current_index(&self) -> usize {
        self.view.current_index
    }

    pub fn active_tag(&self) -> Option<&str> {
        self.view.active_tag.as_deref()
    }

    pub fn filtered_indices(&self) -> &[usize] {
        &self.view.filtered
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Re-apply a persisted view snapshot. Indices outside the catalog
    /// are discarded rather than trusted.
    pub fn restore_view(&mut self, view: ViewState, now: DateTime<Utc>) {
        if self.inert {
            return;
        }
        let tag = view.active_tag.clone();
        let _ = self.select_tag(tag.as_deref(), now);
        if view.is_open && view.current_index < self.catalog.len() {
            let _ = self.open(view.current_index, now);
        }
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Open the modal on a catalog index (or retarget it when already
    /// open). Out-of-range indices are ignored.
    pub fn open(&mut self, index: usize, now: DateTime<Utc>) -> Option<Event> {
        if self.inert || index >= self.catalog.len() {
            return None;
        }
        // Re-opening cancels a still-pending focus restore.
        self.pending_close_at = None;
        if !self.view.is_open {
            self.restore_fragment = self.surface.current_fragment();
            self.view.is_open = true;
            self.surface.capture_focus();
            self.surface.lock_scroll();
            self.surface.show_modal();
            self.surface.focus_close_control();
        }
        self.display(index);
        let fragment = self.write_fragment(index);
        Some(Event::ModalOpened {
            index,
            total: self.catalog.len(),
            fragment,
            at: now,
        })
    }

    /// Close the modal. Focus is restored later, once the close
    /// transition has elapsed (see [`tick`](Self::tick)).
    pub fn close(&mut self, now: DateTime<Utc>) -> Option<Event> {
        self.close_inner(now, true)
    }

    pub fn next(&mut self, now: DateTime<Utc>) -> Option<Event> {
        self.navigate(Direction::Next, now)
    }

    pub fn prev(&mut self, now: DateTime<Utc>) -> Option<Event> {
        self.navigate(Direction::Prev, now)
    }

    /// Apply a tag filter (`None` clears it) and re-render the grid
    /// from the full catalog.
    pub fn select_tag(&mut self, tag: Option<&str>, now: DateTime<Utc>) -> Option<Event> {
        if self.inert {
            return None;
        }
        self.view.active_tag = tag.map(|t| t.to_string());
        self.view.filtered = self.catalog.indices_with_tag(tag);
        if self.view.filtered.is_empty() {
            self.surface.render_empty_message(MSG_EMPTY_FILTER);
        } else {
            self.render_grid();
        }
        Some(Event::FilterChanged {
            tag: self.view.active_tag.clone(),
            matches: self.view.filtered.len(),
            at: now,
        })
    }

    /// React to an externally-changed fragment (history navigation,
    /// hand-edited URL). Never writes the fragment back, so external
    /// navigation cannot feed on itself.
    pub fn sync_from_fragment(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.inert {
            return None;
        }
        let parsed = self
            .surface
            .current_fragment()
            .and_then(|f| parse_fragment(&f, self.catalog.len()));
        match (parsed, self.view.is_open) {
            (Some(index), true) => {
                self.display(index);
                Some(Event::FragmentSynced {
                    index: Some(index),
                    at: now,
                })
            }
            (Some(index), false) => {
                self.pending_close_at = None;
                self.restore_fragment = None;
                self.view.is_open = true;
                self.surface.capture_focus();
                self.surface.lock_scroll();
                self.surface.show_modal();
                self.surface.focus_close_control();
                self.display(index);
                Some(Event::FragmentSynced {
                    index: Some(index),
                    at: now,
                })
            }
            (None, true) => {
                // The fragment already reflects where the user went;
                // closing must not rewrite it.
                self.close_inner(now, false);
                Some(Event::FragmentSynced { index: None, at: now })
            }
            (None, false) => None,
        }
    }

    /// Keyboard handling while the modal is open. Tab cycles focus
    /// strictly among the modal's focusable descendants, wrapping at
    /// both ends.
    pub fn handle_key(&mut self, key: GalleryKey, now: DateTime<Utc>) -> Option<Event> {
        if self.inert || !self.view.is_open {
            return None;
        }
        match key {
            GalleryKey::Escape => self.close(now),
            GalleryKey::ArrowRight => self.next(now),
            GalleryKey::ArrowLeft => self.prev(now),
            GalleryKey::Tab { shift } => {
                let count = self.surface.focusable_count();
                if count == 0 {
                    return None;
                }
                let target = trap_target(self.surface.focused_index(), count, shift);
                self.surface.focus_item(target);
                None
            }
        }
    }

    /// Touch swipe handling. Horizontal displacement must reach the
    /// configured threshold and dominate the vertical one.
    pub fn handle_swipe(&mut self, dx: f64, dy: f64, now: DateTime<Utc>) -> Option<Event> {
        if self.inert || !self.view.is_open {
            return None;
        }
        if dx.abs() < self.config.swipe_threshold_px || dx.abs() <= dy.abs() {
            return None;
        }
        if dx < 0.0 {
            self.next(now)
        } else {
            self.prev(now)
        }
    }

    /// Drive time-based work; call this periodically. Currently this
    /// only settles the deferred focus restore after a close.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if let Some(deadline) = self.pending_close_at {
            if now.timestamp_millis() >= deadline {
                self.pending_close_at = None;
                self.surface.restore_focus();
            }
        }
    }

    /// Tear the gallery down: close immediately (no deferred focus) and
    /// refuse all further operations.
    pub fn destroy(&mut self, now: DateTime<Utc>) {
        if self.view.is_open {
            self.close_inner(now, true);
        }
        if self.pending_close_at.take().is_some() {
            self.surface.restore_focus();
        }
        self.inert = true;
    }

    // ── Internals ────────────────────────────────────────────────────

    fn navigate(&mut self, direction: Direction, now: DateTime<Utc>) -> Option<Event> {
        if self.inert || !self.view.is_open {
            return None;
        }
        let from = self.view.current_index;
        let step: i64 = match direction {
            Direction::Next => 1,
            Direction::Prev => -1,
        };
        let to = self.catalog.wrap(from as i64 + step);
        self.display(to);
        self.write_fragment(to);
        Some(Event::ModalNavigated {
            from,
            to,
            direction,
            at: now,
        })
    }

    fn close_inner(&mut self, now: DateTime<Utc>, restore_fragment: bool) -> Option<Event> {
        if self.inert || !self.view.is_open {
            return None;
        }
        self.view.is_open = false;
        self.surface.hide_modal();
        self.surface.unlock_scroll();
        let restored = self.restore_fragment.take();
        if restore_fragment && self.config.deep_link {
            self.surface.set_fragment(restored.as_deref());
        }
        self.pending_close_at = Some(now.timestamp_millis() + self.config.close_transition_ms);
        Some(Event::ModalClosed {
            restored_fragment: restored,
            at: now,
        })
    }

    /// Swap the modal to `index`: photo, caption, counter, and a
    /// warm-up of both neighbors.
    fn display(&mut self, index: usize) {
        let Some(item) = self.catalog.get(index) else {
            return;
        };
        let chain = self.chain_for(index, item);
        self.surface.show_photo(index, item, &chain);
        self.surface.set_caption(&item.caption);
        self.surface.set_counter(index + 1, self.catalog.len());
        self.view.current_index = index;

        let total = self.catalog.len();
        if total > 1 {
            let next = self.catalog.wrap(index as i64 + 1);
            let prev = self.catalog.wrap(index as i64 - 1);
            self.preload(next);
            if prev != next {
                self.preload(prev);
            }
        }
    }

    fn preload(&mut self, index: usize) {
        if let Some(item) = self.catalog.get(index) {
            let chain = self.chain_for(index, item);
            self.surface.preload(index, &chain);
        }
    }

    fn chain_for(&self, index: usize, item: &PhotoItem) -> Vec<ImageSource> {
        fallback_chain(
            &item.src,
            self.support,
            &format!("photo-{:02}", index + 1),
        )
    }

    fn write_fragment(&mut self, index: usize) -> Option<String> {
        if !self.config.deep_link {
            return None;
        }
        let fragment = format_fragment(index);
        self.surface.set_fragment(Some(&fragment));
        Some(fragment)
    }

    fn render_grid(&mut self) {
        let entries: Vec<(usize, &PhotoItem)> = self
            .view
            .filtered
            .iter()
            .filter_map(|&i| self.catalog.get(i).map(|item| (i, item)))
            .collect();
        self.surface.render_grid(&entries);
    }
}

/// Where Tab should land: one step along the modal's focusable list,
/// wrapping at both ends. `None` (focus escaped the modal) snaps back
/// to the nearest end.
fn trap_target(active: Option<usize>, count: usize, backwards: bool) -> usize {
    let last = count - 1;
    match (active, backwards) {
        (Some(i), false) if i < last => i + 1,
        (_, false) => 0,
        (Some(i), true) if i > 0 => i - 1,
        (_, true) => last,
    }
}
