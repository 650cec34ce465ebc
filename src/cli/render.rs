//! Rendering commands (`songsheet image`, `songsheet pages`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use songsheet::{BandSplit, Rect, Renderer};

use crate::cli::common::{OutputArgs, PlaylistArgs};
use crate::cli::utils::{load_labels, print_json, read_background};

/// Args for `songsheet image`.
#[derive(Args, Debug)]
pub struct ImageArgs {
    /// Full background image.
    #[arg(long, alias = "input-image")]
    pub background: PathBuf,
    /// Row where the repeatable content band begins.
    #[arg(long)]
    pub content_start: i64,
    /// Row where the tail band begins.
    #[arg(long)]
    pub end_start: i64,
    /// Text x position in pixels.
    #[arg(long)]
    pub left_margin: Option<i32>,
    #[command(flatten)]
    pub playlist: PlaylistArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Args for `songsheet pages`.
#[derive(Args, Debug)]
pub struct PagesArgs {
    /// Background shared by every page.
    #[arg(long)]
    pub background: PathBuf,
    /// Text region `x1,y1,x2,y2`.
    #[arg(long, value_parser = parse_rect, allow_hyphen_values = true)]
    pub rect: Rect,
    #[command(flatten)]
    pub playlist: PlaylistArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Clap-friendly parser for `x1,y1,x2,y2`.
pub fn parse_rect(input: &str) -> Result<Rect, String> {
    input.parse::<Rect>().map_err(|err| err.to_string())
}

pub fn image(args: ImageArgs) -> Result<()> {
    let mut config = args.playlist.layout_config()?;
    args.output.apply(&mut config);
    if let Some(margin) = args.left_margin {
        config.left_margin = margin;
    }

    let labels = load_labels(&args.playlist.playlist, args.playlist.order.into())?;
    let background = read_background(&args.background)?;
    let split = BandSplit::new(args.content_start, args.end_start);

    let output = Renderer::new(config)
        .render_image(&background, &labels, split)
        .with_context(|| format!("failed to render {}", args.background.display()))?;

    if args.output.json {
        return print_json(&output);
    }
    println!(
        "Rendered {} line(s) into a {}px tall image: {}",
        output.lines, output.height, output.image.public_path
    );
    Ok(())
}

pub fn pages(args: PagesArgs) -> Result<()> {
    let mut config = args.playlist.layout_config()?;
    args.output.apply(&mut config);

    let labels = load_labels(&args.playlist.playlist, args.playlist.order.into())?;
    let background = read_background(&args.background)?;

    let output = Renderer::new(config)
        .render_pages(&background, &labels, args.rect)
        .with_context(|| format!("failed to render pages on {}", args.background.display()))?;

    if args.output.json {
        return print_json(&output);
    }
    println!(
        "Rendered {} line(s) onto {} page(s), {} per page:",
        output.lines,
        output.pages.len(),
        output.lines_per_page
    );
    for page in &output.pages {
        println!("  - {}", page.public_path);
    }
    println!("Archive: {}", output.archive.public_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rect_flag_parses() {
        assert_eq!(parse_rect("60,300,1100,1700"), Ok(Rect::new(60, 300, 1100, 1700)));
        assert!(parse_rect("60,300").is_err());
    }
}
