use crate::error::{PlaylistError, Result};
use crate::layout::geometry::Rect;
use crate::layout::wrap::Line;

pub const DEFAULT_PAGE_LINE_HEIGHT: u32 = 80;

/// A contiguous run of lines destined for one output image. `number` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a> {
    pub number: usize,
    pub lines: &'a [Line],
}

/// Lines that fit in `rect` at `line_height`, never less than one.
pub fn lines_per_page(rect: &Rect, line_height: u32) -> usize {
    let per_page = rect.height() / i64::from(line_height.max(1));
    per_page.max(1) as usize
}

/// Split `lines` into fixed-capacity pages drawn inside `rect` of a `width` x `height` background.
pub fn paginate<'a>(
    lines: &'a [Line],
    rect: &Rect,
    (width, height): (u32, u32),
    line_height: u32,
) -> Result<Vec<Page<'a>>> {
    rect.validate_within(width, height)?;
    if line_height == 0 {
        return Err(PlaylistError::validation(
            "line height must be greater than zero",
        ));
    }
    if lines.is_empty() {
        return Err(PlaylistError::validation("empty label list"));
    }

    let per_page = lines_per_page(rect, line_height);
    let pages: Vec<Page<'a>> = lines
        .chunks(per_page)
        .enumerate()
        .map(|(idx, chunk)| Page {
            number: idx + 1,
            lines: chunk,
        })
        .collect();
    tracing::debug!(
        lines = lines.len(),
        lines_per_page = per_page,
        pages = pages.len(),
        "paginated playlist"
    );
    Ok(pages)
}
