//! Pure layout: wrapping labels into lines, validating geometry, and paging lines.

mod geometry;
mod paginate;
mod wrap;

pub use geometry::{BandRows, BandSplit, Rect};
pub use paginate::{DEFAULT_PAGE_LINE_HEIGHT, Page, lines_per_page, paginate};
pub use wrap::{
    DEFAULT_MAX_CHARS_PER_LINE, DEFAULT_MAX_LABELS_PER_LINE, LABEL_SEPARATOR, Label, Line,
    WrapLimits, ensure_labels, wrap_labels,
};
