use image::RgbImage;
use image::imageops::{crop_imm, replace};

use crate::error::{PlaylistError, Result};
use crate::layout::{BandRows, BandSplit};

/// Floor applied to the default line height in single-image mode.
pub const MIN_DEFAULT_LINE_HEIGHT: u32 = 80;

/// Head/content/tail strips cut from one background.
pub struct Bands {
    rows: BandRows,
    pub head: RgbImage,
    pub content: RgbImage,
    pub tail: RgbImage,
}

impl Bands {
    /// Validate `split` against `background` and slice it into three bands.
    pub fn split(background: &RgbImage, split: BandSplit) -> Result<Self> {
        let rows = split.validate(background.height())?;
        let width = background.width();
        Ok(Self {
            rows,
            head: crop_imm(background, 0, 0, width, rows.head_height()).to_image(),
            content: crop_imm(
                background,
                0,
                rows.content_start(),
                width,
                rows.content_height(),
            )
            .to_image(),
            tail: crop_imm(background, 0, rows.tail_start(), width, rows.tail_height())
                .to_image(),
        })
    }

    pub fn rows(&self) -> BandRows {
        self.rows
    }
}

/// Geometry of a composed single-image canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TallLayout {
    pub head_height: u32,
    pub content_height: u32,
    pub tail_height: u32,
    pub line_height: u32,
    pub line_count: usize,
    pub total_height: u32,
}

impl TallLayout {
    /// Work out canvas height; `line_height` defaults to `max(content height, 80)`.
    pub fn plan(rows: BandRows, line_count: usize, line_height: Option<u32>) -> Result<Self> {
        let line_height =
            line_height.unwrap_or_else(|| rows.content_height().max(MIN_DEFAULT_LINE_HEIGHT));
        if line_height == 0 {
            return Err(PlaylistError::validation(
                "line height must be greater than zero",
            ));
        }
        if line_count == 0 {
            return Err(PlaylistError::validation("empty label list"));
        }
        let body = u32::try_from(line_count)
            .ok()
            .and_then(|n| n.checked_mul(line_height))
            .ok_or_else(|| PlaylistError::validation("playlist too long for one image"))?;
        let total_height = rows
            .head_height()
            .checked_add(body)
            .and_then(|h| h.checked_add(rows.tail_height()))
            .ok_or_else(|| PlaylistError::validation("playlist too long for one image"))?;
        Ok(Self {
            head_height: rows.head_height(),
            content_height: rows.content_height(),
            tail_height: rows.tail_height(),
            line_height,
            line_count,
            total_height,
        })
    }

    /// Top row of the slot for line `index`.
    pub fn slot_top(&self, index: usize) -> u32 {
        self.head_height + index as u32 * self.line_height
    }

    /// Number of whole content tiles pasted between head and tail.
    pub fn content_tiles(&self) -> u32 {
        (self.total_height - self.head_height - self.tail_height) / self.content_height
    }
}

/// Build the tall canvas: head, whole content tiles, then tail.
///
/// Only whole content tiles are pasted. A remainder shorter than one tile stays unfilled
/// (black) just above the tail.
pub fn compose(bands: &Bands, layout: &TallLayout) -> RgbImage {
    let width = bands.content.width();
    let mut canvas = RgbImage::new(width, layout.total_height);

    replace(&mut canvas, &bands.head, 0, 0);
    for tile in 0..layout.content_tiles() {
        let y = layout.head_height + tile * layout.content_height;
        replace(&mut canvas, &bands.content, 0, i64::from(y));
    }
    let tail_y = layout.total_height - layout.tail_height;
    replace(&mut canvas, &bands.tail, 0, i64::from(tail_y));

    tracing::debug!(
        total_height = layout.total_height,
        tiles = layout.content_tiles(),
        "composed background"
    );
    canvas
}
