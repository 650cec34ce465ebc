//! Layout settings shared by both render modes, loadable from a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PlaylistError, Result};
use crate::layout::{DEFAULT_MAX_CHARS_PER_LINE, DEFAULT_MAX_LABELS_PER_LINE, WrapLimits};
use crate::raster::{DEFAULT_FONT_CANDIDATES, DEFAULT_FONT_SIZE};

pub const DEFAULT_LEFT_MARGIN: i32 = 50;

/// Optional render inputs. Missing JSON fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Font file tried before any system font.
    pub font_path: Option<PathBuf>,
    pub font_size: u32,
    /// System font file names, tried in order.
    pub font_candidates: Vec<String>,
    pub max_chars_per_line: usize,
    pub max_labels_per_line: usize,
    /// Row height per line; `None` picks the mode default.
    pub line_height: Option<u32>,
    /// Text x position in single-image mode.
    pub left_margin: i32,
    pub output_dir: PathBuf,
    /// Prefix for caller-facing paths; `None` uses `output_dir`.
    pub public_prefix: Option<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            font_size: DEFAULT_FONT_SIZE,
            font_candidates: DEFAULT_FONT_CANDIDATES
                .iter()
                .map(|name| name.to_string())
                .collect(),
            max_chars_per_line: DEFAULT_MAX_CHARS_PER_LINE,
            max_labels_per_line: DEFAULT_MAX_LABELS_PER_LINE,
            line_height: None,
            left_margin: DEFAULT_LEFT_MARGIN,
            output_dir: PathBuf::from("."),
            public_prefix: None,
        }
    }
}

impl LayoutConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| PlaylistError::io(path, err))?;
        serde_json::from_str(&raw).map_err(|source| PlaylistError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn wrap_limits(&self) -> Result<WrapLimits> {
        WrapLimits::new(self.max_chars_per_line, self.max_labels_per_line)
    }

    /// Check numeric settings before any work starts.
    pub fn validate(&self) -> Result<()> {
        self.wrap_limits()?;
        if self.font_size == 0 {
            return Err(PlaylistError::validation(
                "font size must be greater than zero",
            ));
        }
        if self.line_height == Some(0) {
            return Err(PlaylistError::validation(
                "line height must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: LayoutConfig =
            serde_json::from_str(r#"{ "font_size": 42, "line_height": 96 }"#).unwrap();
        assert_eq!(config.font_size, 42);
        assert_eq!(config.line_height, Some(96));
        assert_eq!(config.max_chars_per_line, 35);
        assert_eq!(config.max_labels_per_line, 6);
        assert_eq!(config.font_candidates[0], "msyhl.ttc");
        assert_eq!(config.font_candidates.len(), 5);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<LayoutConfig>(r#"{ "fontsize": 1 }"#).is_err());
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        fs::write(&path, "{ not json").unwrap();
        let err = LayoutConfig::load(&path).unwrap_err();
        assert!(matches!(err, PlaylistError::Config { .. }));
        assert!(err.to_string().contains("layout.json"));
    }

    #[test]
    fn zero_values_fail_validation() {
        let mut config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        config.line_height = Some(0);
        assert!(config.validate().unwrap_err().is_validation());
        config.line_height = None;
        config.font_size = 0;
        assert!(config.validate().is_err());
        config.font_size = 38;
        config.max_labels_per_line = 0;
        assert!(config.validate().is_err());
    }
}
