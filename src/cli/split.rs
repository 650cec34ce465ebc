//! Band export command (`songsheet split`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use songsheet::{BandSplit, LayoutConfig, Renderer};

use crate::cli::utils::{print_json, read_background};

/// Args for `songsheet split`.
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Full background image.
    #[arg(long, alias = "input-image")]
    pub background: PathBuf,
    /// Row where the repeatable content band begins.
    #[arg(long)]
    pub content_start: i64,
    /// Row where the tail band begins.
    #[arg(long)]
    pub end_start: i64,
    /// Directory receiving the three band images.
    #[arg(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,
    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn handle(args: SplitArgs) -> Result<()> {
    let background = read_background(&args.background)?;
    let config = LayoutConfig {
        output_dir: args.output_dir.clone(),
        ..LayoutConfig::default()
    };
    let files = Renderer::new(config)
        .export_bands(
            &background,
            BandSplit::new(args.content_start, args.end_start),
        )
        .with_context(|| format!("failed to split {}", args.background.display()))?;

    if args.json {
        return print_json(&files);
    }
    println!("Split {} into:", args.background.display());
    for file in &files {
        println!("  - {}", file.public_path);
    }
    Ok(())
}
