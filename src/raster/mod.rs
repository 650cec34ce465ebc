//! Pixel work: color choice, band tiling, font resolution and text drawing.

mod bands;
mod color;
mod font;
mod paint;

pub use bands::{Bands, MIN_DEFAULT_LINE_HEIGHT, TallLayout, compose};
pub use color::{ColorPair, LIGHT_THRESHOLD, sample_pixel, select_colors};
pub use font::{
    DEFAULT_FONT_CANDIDATES, DEFAULT_FONT_SIZE, FontLocation, FontOrigin, FontResolver, LabelFont,
};
pub use paint::{GLYPH_HEIGHT, GLYPH_WIDTH, SHADOW_OFFSET, draw_line, text_top};
