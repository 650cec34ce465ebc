//! End-to-end pipelines: labels and background in, PNG (and zip) paths out.

use image::RgbImage;
use serde::Serialize;

use crate::config::LayoutConfig;
use crate::emit::{EmittedFile, PageEmitter};
use crate::error::{PlaylistError, Result};
use crate::layout::{
    BandSplit, DEFAULT_PAGE_LINE_HEIGHT, Label, Line, Rect, ensure_labels, lines_per_page,
    paginate, wrap_labels,
};
use crate::raster::{
    Bands, ColorPair, FontResolver, LabelFont, TallLayout, compose, draw_line, sample_pixel,
    select_colors,
};

/// Inset of the color sample from the content band's top-left corner.
const CONTENT_SAMPLE_MARGIN: u32 = 10;
/// Inset of the color sample from the text rect's top-left corner.
const RECT_SAMPLE_MARGIN: u32 = 5;

pub const HEAD_BAND_FILE: &str = "head_bg.png";
pub const CONTENT_BAND_FILE: &str = "content_bg.png";
pub const TAIL_BAND_FILE: &str = "end_bg.png";

/// Result of single-image mode.
#[derive(Debug, Clone, Serialize)]
pub struct ImageOutput {
    pub image: EmittedFile,
    pub lines: usize,
    pub line_height: u32,
    pub height: u32,
}

/// Result of multi-page mode.
#[derive(Debug, Clone, Serialize)]
pub struct PagesOutput {
    pub pages: Vec<EmittedFile>,
    pub archive: EmittedFile,
    pub lines: usize,
    pub lines_per_page: usize,
}

/// Decode raw background bytes into an RGB raster.
pub fn decode_background(bytes: &[u8]) -> Result<RgbImage> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgb8())
        .map_err(PlaylistError::Decode)
}

/// Compose the tall single image in memory.
pub fn compose_playlist_image(
    background: &RgbImage,
    lines: &[Line],
    split: BandSplit,
    config: &LayoutConfig,
    font: &LabelFont,
) -> Result<(RgbImage, TallLayout)> {
    let bands = Bands::split(background, split)?;
    let layout = TallLayout::plan(bands.rows(), lines.len(), config.line_height)?;
    let colors = select_colors(sample_pixel(&bands.content, 0, 0, CONTENT_SAMPLE_MARGIN));

    let mut canvas = compose(&bands, &layout);
    for (idx, line) in lines.iter().enumerate() {
        draw_line(
            &mut canvas,
            line,
            layout.slot_top(idx),
            layout.line_height,
            config.left_margin,
            colors,
            font,
        );
    }
    Ok((canvas, layout))
}

/// Render each page onto its own copy of `background`, in page order.
pub fn compose_playlist_pages(
    background: &RgbImage,
    lines: &[Line],
    rect: Rect,
    line_height: u32,
    font: &LabelFont,
) -> Result<Vec<RgbImage>> {
    let pages = paginate(lines, &rect, background.dimensions(), line_height)?;
    // Validated above, so the corner is inside the image.
    let colors = select_colors(sample_pixel(
        background,
        rect.x1 as u32,
        rect.y1 as u32,
        RECT_SAMPLE_MARGIN,
    ));

    Ok(pages
        .iter()
        .map(|page| draw_page(background, page.lines, &rect, line_height, colors, font))
        .collect())
}

fn draw_page(
    background: &RgbImage,
    lines: &[Line],
    rect: &Rect,
    line_height: u32,
    colors: ColorPair,
    font: &LabelFont,
) -> RgbImage {
    let mut canvas = background.clone();
    let mut top = rect.y1 as u32;
    for line in lines {
        draw_line(&mut canvas, line, top, line_height, rect.x1 as i32, colors, font);
        top += line_height;
    }
    canvas
}

/// Runs either render mode with one configuration, font lookup and output location.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: LayoutConfig,
    fonts: FontResolver,
    emitter: PageEmitter,
    timestamp: Option<i64>,
}

impl Renderer {
    pub fn new(config: LayoutConfig) -> Self {
        let emitter = match &config.public_prefix {
            Some(prefix) => PageEmitter::new(&config.output_dir, prefix.clone()),
            None => PageEmitter::local(&config.output_dir),
        };
        Self {
            config,
            fonts: FontResolver::system(),
            emitter,
            timestamp: None,
        }
    }

    pub fn with_fonts(mut self, fonts: FontResolver) -> Self {
        self.fonts = fonts;
        self
    }

    /// Fix the timestamp used in output names instead of reading the clock.
    pub fn at_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn wrap(&self, labels: &[Label]) -> Result<Vec<Line>> {
        self.config.validate()?;
        ensure_labels(labels)?;
        Ok(wrap_labels(labels, self.config.wrap_limits()?))
    }

    /// Single-image mode: one tall PNG with the content band tiled behind the lines.
    pub fn render_image(
        &self,
        background: &[u8],
        labels: &[Label],
        split: BandSplit,
    ) -> Result<ImageOutput> {
        let lines = self.wrap(labels)?;
        let background = decode_background(background)?;
        split.validate(background.height())?;

        let font = self.load_font();
        let (canvas, layout) =
            compose_playlist_image(&background, &lines, split, &self.config, &font)?;
        let image = self.emitter.emit_single(&canvas, self.now())?;
        Ok(ImageOutput {
            image,
            lines: lines.len(),
            line_height: layout.line_height,
            height: layout.total_height,
        })
    }

    /// Multi-page mode: one PNG per page inside `rect`, plus a zip of all pages.
    pub fn render_pages(
        &self,
        background: &[u8],
        labels: &[Label],
        rect: Rect,
    ) -> Result<PagesOutput> {
        let lines = self.wrap(labels)?;
        let background = decode_background(background)?;
        rect.validate_within(background.width(), background.height())?;
        let line_height = self.config.line_height.unwrap_or(DEFAULT_PAGE_LINE_HEIGHT);

        let font = self.load_font();
        let canvases = compose_playlist_pages(&background, &lines, rect, line_height, &font)?;
        let emitted = self.emitter.emit_pages(&canvases, self.now())?;
        Ok(PagesOutput {
            pages: emitted.pages,
            archive: emitted.archive,
            lines: lines.len(),
            lines_per_page: lines_per_page(&rect, line_height),
        })
    }

    /// Write the head, content and tail bands of `background` as separate PNGs.
    /// Zero-height bands are skipped.
    pub fn export_bands(&self, background: &[u8], split: BandSplit) -> Result<Vec<EmittedFile>> {
        let background = decode_background(background)?;
        let bands = Bands::split(&background, split)?;
        [
            (&bands.head, HEAD_BAND_FILE),
            (&bands.content, CONTENT_BAND_FILE),
            (&bands.tail, TAIL_BAND_FILE),
        ]
        .into_iter()
        .filter(|(band, _)| band.height() > 0)
        .map(|(band, name)| self.emitter.emit_named(band, name))
        .collect()
    }

    fn load_font(&self) -> LabelFont {
        self.fonts.resolve(
            self.config.font_path.as_deref(),
            &self.config.font_candidates,
            self.config.font_size,
        )
    }

    fn now(&self) -> i64 {
        self.timestamp
            .unwrap_or_else(|| chrono::Utc::now().timestamp())
    }
}
