//! Shared clap helper types for CLI commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use songsheet::{LabelOrder, LayoutConfig};

/// Label ordering accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OrderArg {
    /// Keep playlist order.
    Given,
    /// Shortest names first.
    Length,
}

impl From<OrderArg> for LabelOrder {
    fn from(value: OrderArg) -> LabelOrder {
        match value {
            OrderArg::Given => LabelOrder::Given,
            OrderArg::Length => LabelOrder::Length,
        }
    }
}

/// Playlist input and wrapping flags.
#[derive(Args, Debug)]
pub struct PlaylistArgs {
    /// Playlist text file, one song per line (`-` for stdin).
    #[arg(long)]
    pub playlist: PathBuf,
    /// Ordering applied before wrapping.
    #[arg(long, default_value_t = OrderArg::Given, value_enum)]
    pub order: OrderArg,
    /// JSON layout config; flags below override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Max characters per rendered line before wrapping.
    #[arg(long)]
    pub max_chars_per_line: Option<usize>,
    /// Max song names per line before wrapping.
    #[arg(long, alias = "max-songs-per-line")]
    pub max_labels_per_line: Option<usize>,
}

/// Flags controlling font, placement and output location.
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Font file tried before system fonts.
    #[arg(long)]
    pub font_path: Option<PathBuf>,
    /// Font size in pixels.
    #[arg(long)]
    pub font_size: Option<u32>,
    /// Line height in pixels.
    #[arg(long)]
    pub line_height: Option<u32>,
    /// Directory receiving generated files.
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,
    /// Prefix for reported paths (e.g. `/static/generated`).
    #[arg(long)]
    pub public_prefix: Option<String>,
    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

impl PlaylistArgs {
    /// Load the config file (if any) and apply wrapping overrides.
    pub fn layout_config(&self) -> Result<LayoutConfig> {
        let mut config = match &self.config {
            Some(path) => LayoutConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => LayoutConfig::default(),
        };
        if let Some(value) = self.max_chars_per_line {
            config.max_chars_per_line = value;
        }
        if let Some(value) = self.max_labels_per_line {
            config.max_labels_per_line = value;
        }
        Ok(config)
    }
}

impl OutputArgs {
    pub fn apply(&self, config: &mut LayoutConfig) {
        if let Some(path) = &self.font_path {
            config.font_path = Some(path.clone());
        }
        if let Some(size) = self.font_size {
            config.font_size = size;
        }
        if let Some(height) = self.line_height {
            config.line_height = Some(height);
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(prefix) = &self.public_prefix {
            config.public_prefix = Some(prefix.clone());
        }
    }
}
