use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlaylistError, Result};

/// Axis-aligned text region for paged rendering, in background pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl Rect {
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn height(&self) -> i64 {
        self.y2 - self.y1
    }

    /// Require a non-degenerate rect lying inside a `width` x `height` image.
    pub fn validate_within(&self, width: u32, height: u32) -> Result<()> {
        if self.x1 >= self.x2 || self.y1 >= self.y2 {
            return Err(PlaylistError::validation(format!(
                "rect {self} must satisfy x1 < x2 and y1 < y2"
            )));
        }
        let (width, height) = (i64::from(width), i64::from(height));
        if self.x1 < 0 || self.y1 < 0 || self.x2 > width || self.y2 > height {
            return Err(PlaylistError::validation(format!(
                "rect {self} is outside background bounds {width}x{height}"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x1, self.y1, self.x2, self.y2)
    }
}

/// Parses `x1,y1,x2,y2`. Ordering is checked here; bounds need the background.
impl FromStr for Rect {
    type Err = PlaylistError;

    fn from_str(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(PlaylistError::validation(
                "rect must be in format x1,y1,x2,y2",
            ));
        }
        let mut values = [0i64; 4];
        for (slot, raw) in values.iter_mut().zip(&parts) {
            *slot = raw
                .parse()
                .map_err(|_| PlaylistError::validation("rect values must be integers"))?;
        }
        let rect = Rect::new(values[0], values[1], values[2], values[3]);
        if rect.x1 >= rect.x2 || rect.y1 >= rect.y2 {
            return Err(PlaylistError::validation(
                "rect must satisfy x1 < x2 and y1 < y2",
            ));
        }
        Ok(rect)
    }
}

/// Row offsets dividing a background into head, content and tail bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandSplit {
    pub content_start: i64,
    pub end_start: i64,
}

impl BandSplit {
    pub fn new(content_start: i64, end_start: i64) -> Self {
        Self {
            content_start,
            end_start,
        }
    }

    /// Check `0 <= content_start < end_start <= height`.
    pub fn validate(&self, height: u32) -> Result<BandRows> {
        let h = i64::from(height);
        if self.content_start < 0 || self.content_start >= self.end_start || self.end_start > h {
            return Err(PlaylistError::validation(format!(
                "band split must satisfy 0 <= content_start < end_start <= {h} (got {}, {})",
                self.content_start, self.end_start
            )));
        }
        // Bounded by `height`, so both fit in u32.
        Ok(BandRows {
            content_start: self.content_start as u32,
            end_start: self.end_start as u32,
            height,
        })
    }
}

/// Validated band rows for one background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandRows {
    content_start: u32,
    end_start: u32,
    height: u32,
}

impl BandRows {
    pub fn head_height(&self) -> u32 {
        self.content_start
    }

    pub fn content_start(&self) -> u32 {
        self.content_start
    }

    pub fn content_height(&self) -> u32 {
        self.end_start - self.content_start
    }

    pub fn tail_start(&self) -> u32 {
        self.end_start
    }

    pub fn tail_height(&self) -> u32 {
        self.height - self.end_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rect_past_right_edge_is_rejected() {
        let err = Rect::new(0, 0, 100, 50).validate_within(80, 80).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn rect_touching_edges_is_accepted() {
        assert!(Rect::new(0, 0, 80, 80).validate_within(80, 80).is_ok());
    }

    #[test]
    fn degenerate_and_negative_rects_are_rejected() {
        for rect in [
            Rect::new(10, 0, 10, 20),
            Rect::new(0, 30, 10, 20),
            Rect::new(-1, 0, 10, 10),
            Rect::new(0, 0, 10, 81),
        ] {
            assert!(rect.validate_within(80, 80).is_err(), "{rect} accepted");
        }
    }

    #[test]
    fn parses_rect_strings() {
        assert_eq!(
            "60, 300,1100,1700".parse::<Rect>().unwrap(),
            Rect::new(60, 300, 1100, 1700)
        );
        assert!("1,2,3".parse::<Rect>().is_err());
        assert!("a,b,c,d".parse::<Rect>().is_err());
        assert!("5,5,1,10".parse::<Rect>().is_err());
    }

    #[test]
    fn band_rows_follow_split_points() {
        let rows = BandSplit::new(120, 1560).validate(2000).unwrap();
        assert_eq!(rows.head_height(), 120);
        assert_eq!(rows.content_height(), 1440);
        assert_eq!(rows.tail_start(), 1560);
        assert_eq!(rows.tail_height(), 440);
    }

    #[test]
    fn band_split_bounds_are_enforced() {
        assert!(BandSplit::new(0, 2000).validate(2000).is_ok());
        for split in [
            BandSplit::new(-1, 10),
            BandSplit::new(10, 10),
            BandSplit::new(20, 10),
            BandSplit::new(0, 2001),
        ] {
            assert!(split.validate(2000).unwrap_err().is_validation());
        }
    }
}
