//! Lay out playlists of song names onto background art.
//!
//! Two modes share the same wrapping, color choice and text drawing:
//! a single tall image whose middle band is tiled to fit every line, or a set of
//! fixed-size pages drawn into a rectangle of one background and bundled as a zip.

mod config;
mod emit;
mod error;
mod playlist;
mod render;

pub mod layout;
pub mod raster;

pub use config::{DEFAULT_LEFT_MARGIN, LayoutConfig};
pub use emit::{EmittedFile, EmittedPages, PageEmitter};
pub use error::{PlaylistError, Result};
pub use layout::{BandSplit, Label, Line, Rect, WrapLimits, wrap_labels};
pub use playlist::{LabelOrder, order_labels, parse_playlist};
pub use render::{
    CONTENT_BAND_FILE, HEAD_BAND_FILE, ImageOutput, PagesOutput, Renderer, TAIL_BAND_FILE,
    compose_playlist_image, compose_playlist_pages, decode_background,
};
