use chrono::Utc;
use clap::Subcommand;
use keepsake_core::gallery::{Catalog, FormatSupport, GalleryEngine, ViewState};
use keepsake_core::storage::{keys, AppConfig, KvStore, SqliteStore};

use crate::surfaces::TerminalGallerySurface;

#[derive(Subcommand)]
pub enum GalleryAction {
    /// List photos in the current filtered view
    List,
    /// Filter the grid by tag (no tag clears the filter)
    Filter {
        /// Tag to filter by
        tag: Option<String>,
    },
    /// Open the modal on a photo
    Open {
        /// Photo number, 1-based
        number: usize,
    },
    /// Step the open modal forward (wraps around)
    Next,
    /// Step the open modal backward (wraps around)
    Prev,
    /// Close the modal
    Close,
    /// Print the view state as JSON
    Status,
    /// Apply an externally-set fragment, e.g. "photo-3"
    Sync {
        /// The fragment; omit to simulate a cleared one
        fragment: Option<String>,
    },
}

fn load_view(store: &SqliteStore) -> ViewState {
    store
        .get(keys::GALLERY_VIEW)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

fn save_view(store: &mut SqliteStore, view: &ViewState) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(view)?;
    store.set(keys::GALLERY_VIEW, &json);
    Ok(())
}

pub fn run(action: GalleryAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_or_default();
    let mut store = SqliteStore::open();
    let saved = load_view(&store);
    let now = Utc::now();

    let catalog = Catalog::new(config.photos.clone());
    let mut gallery = GalleryEngine::new(
        catalog,
        config.gallery.clone(),
        FormatSupport::default(),
        TerminalGallerySurface::default(),
    );
    gallery.restore_view(saved, now);

    let event = match action {
        GalleryAction::List => None,
        GalleryAction::Filter { tag } => gallery.select_tag(tag.as_deref(), now),
        GalleryAction::Open { number } => {
            if number == 0 {
                return Err("photo numbers start at 1".into());
            }
            gallery.open(number - 1, now)
        }
        GalleryAction::Next => gallery.next(now),
        GalleryAction::Prev => gallery.prev(now),
        GalleryAction::Close => gallery.close(now),
        GalleryAction::Status => {
            println!("{}", serde_json::to_string_pretty(gallery.view())?);
            None
        }
        GalleryAction::Sync { fragment } => {
            gallery.surface_mut().fragment = fragment;
            gallery.sync_from_fragment(now)
        }
    };

    if let Some(event) = event {
        println!("{}", serde_json::to_string_pretty(&event)?);
    }

    save_view(&mut store, gallery.view())?;
    Ok(())
}
