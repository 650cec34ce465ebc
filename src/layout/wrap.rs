use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlaylistError, Result};

/// Separator placed between labels sharing a line.
pub const LABEL_SEPARATOR: &str = "  ";
const SEPARATOR_CHARS: usize = 2;

pub const DEFAULT_MAX_CHARS_PER_LINE: usize = 35;
pub const DEFAULT_MAX_LABELS_PER_LINE: usize = 6;

/// A single song name. Length is measured in code points.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::new(value)
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::new(value)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One rendered row: an ordered run of labels joined by [`LABEL_SEPARATOR`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    labels: Vec<Label>,
    display: String,
}

impl Line {
    fn from_labels(labels: Vec<Label>) -> Self {
        let display = labels
            .iter()
            .map(Label::as_str)
            .collect::<Vec<_>>()
            .join(LABEL_SEPARATOR);
        Self { labels, display }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn char_count(&self) -> usize {
        self.display.chars().count()
    }
}

/// Thresholds applied by [`wrap_labels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapLimits {
    pub max_chars_per_line: usize,
    pub max_labels_per_line: usize,
}

impl WrapLimits {
    pub fn new(max_chars_per_line: usize, max_labels_per_line: usize) -> Result<Self> {
        if max_chars_per_line == 0 {
            return Err(PlaylistError::validation(
                "max chars per line must be greater than zero",
            ));
        }
        if max_labels_per_line == 0 {
            return Err(PlaylistError::validation(
                "max labels per line must be greater than zero",
            ));
        }
        Ok(Self {
            max_chars_per_line,
            max_labels_per_line,
        })
    }
}

impl Default for WrapLimits {
    fn default() -> Self {
        Self {
            max_chars_per_line: DEFAULT_MAX_CHARS_PER_LINE,
            max_labels_per_line: DEFAULT_MAX_LABELS_PER_LINE,
        }
    }
}

/// Fail with a validation error when there is nothing to lay out.
pub fn ensure_labels(labels: &[Label]) -> Result<()> {
    if labels.is_empty() {
        return Err(PlaylistError::validation("empty label list"));
    }
    Ok(())
}

/// Greedily pack labels into lines, preserving input order.
///
/// A label is never split: one longer than `max_chars_per_line` ends up alone on its line.
/// The running count reserves two characters per label for the separator that will follow it.
pub fn wrap_labels(labels: &[Label], limits: WrapLimits) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current: Vec<Label> = Vec::new();
    let mut current_chars = 0usize;

    for label in labels {
        let len = label.char_count();
        if !current.is_empty()
            && (current_chars + len > limits.max_chars_per_line
                || current.len() >= limits.max_labels_per_line)
        {
            lines.push(Line::from_labels(std::mem::take(&mut current)));
            current_chars = 0;
        }
        current.push(label.clone());
        current_chars += len + SEPARATOR_CHARS;
    }

    if !current.is_empty() {
        lines.push(Line::from_labels(current));
    }
    lines
}
