use serde::{Deserialize, Serialize};

use crate::layout::Label;

/// Ordering applied to labels before wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelOrder {
    /// Keep input order.
    #[default]
    Given,
    /// Shortest first; equal lengths by code-point order. Stable for duplicates.
    Length,
}

/// Parse a playlist: one label per line, trimmed, blank lines dropped, duplicates kept.
pub fn parse_playlist(text: &str) -> Vec<Label> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Label::from)
        .collect()
}

pub fn order_labels(mut labels: Vec<Label>, order: LabelOrder) -> Vec<Label> {
    if order == LabelOrder::Length {
        labels.sort_by(|a, b| {
            a.char_count()
                .cmp(&b.char_count())
                .then_with(|| a.as_str().cmp(b.as_str()))
        });
    }
    labels
}
