//! Photo gallery: catalog, tag-filtered grid, modal viewer, deep links,
//! and image source negotiation.

mod catalog;
mod engine;
mod fragment;
mod sources;
mod surface;

pub use catalog::{Catalog, PhotoItem};
pub use engine::{GalleryEngine, GalleryKey, ViewState};
pub use fragment::{format_fragment, parse_fragment};
pub use sources::{
    fallback_chain, placeholder_data_uri, preferred_ext, preferred_src, FormatSupport,
    ImageSource, SourceKind,
};
pub use surface::{GallerySurface, NoopGallerySurface};
