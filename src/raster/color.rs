use image::{Rgb, RgbImage};

/// Channel sum above which a background counts as light.
pub const LIGHT_THRESHOLD: u32 = 382;

const DARK_TEXT: Rgb<u8> = Rgb([30, 30, 30]);
const LIGHT_TEXT: Rgb<u8> = Rgb([240, 240, 240]);
const DARK_SHADOW: Rgb<u8> = Rgb([0, 0, 0]);
const SHADOW_DARKEN: u8 = 30;

/// Text and drop-shadow colors chosen once per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub text: Rgb<u8>,
    pub shadow: Rgb<u8>,
}

/// Pick readable text colors for a sampled background pixel.
pub fn select_colors(pixel: Rgb<u8>) -> ColorPair {
    let [r, g, b] = pixel.0;
    let sum = u32::from(r) + u32::from(g) + u32::from(b);
    if sum > LIGHT_THRESHOLD {
        ColorPair {
            text: DARK_TEXT,
            shadow: Rgb([
                r.saturating_sub(SHADOW_DARKEN),
                g.saturating_sub(SHADOW_DARKEN),
                b.saturating_sub(SHADOW_DARKEN),
            ]),
        }
    } else {
        ColorPair {
            text: LIGHT_TEXT,
            shadow: DARK_SHADOW,
        }
    }
}

/// Read the pixel `margin` px inside `(x, y)`, clamped to the image.
pub fn sample_pixel(image: &RgbImage, x: u32, y: u32, margin: u32) -> Rgb<u8> {
    let sx = x.saturating_add(margin).min(image.width().saturating_sub(1));
    let sy = y.saturating_add(margin).min(image.height().saturating_sub(1));
    *image.get_pixel(sx, sy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn light_background_gets_dark_text() {
        let pair = select_colors(Rgb([200, 200, 200]));
        assert_eq!(pair.text, Rgb([30, 30, 30]));
        assert_eq!(pair.shadow, Rgb([170, 170, 170]));
    }

    #[test]
    fn dark_background_gets_light_text() {
        let pair = select_colors(Rgb([10, 10, 10]));
        assert_eq!(pair.text, Rgb([240, 240, 240]));
        assert_eq!(pair.shadow, Rgb([0, 0, 0]));
    }

    #[test]
    fn threshold_sits_at_382() {
        assert_eq!(select_colors(Rgb([127, 127, 128])).text, LIGHT_TEXT);
        assert_eq!(select_colors(Rgb([127, 128, 128])).text, DARK_TEXT);
    }

    #[test]
    fn shadow_channels_floor_at_zero() {
        let pair = select_colors(Rgb([255, 120, 20]));
        assert_eq!(pair.shadow, Rgb([225, 90, 0]));
    }

    #[test]
    fn sampling_clamps_to_image() {
        let mut image = RgbImage::new(4, 4);
        image.put_pixel(3, 3, Rgb([9, 8, 7]));
        image.put_pixel(2, 1, Rgb([1, 2, 3]));
        assert_eq!(sample_pixel(&image, 0, 0, 10), Rgb([9, 8, 7]));
        assert_eq!(sample_pixel(&image, 1, 0, 1), Rgb([1, 2, 3]));
    }
}
