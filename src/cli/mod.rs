//! Command-line interface wiring for the `songsheet` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! the submodule handling each command.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

pub mod common;
pub mod render;
pub mod split;
pub mod utils;
pub mod wrap;

/// Parsed CLI entrypoint for the `songsheet` binary.
#[derive(Parser, Debug)]
#[command(name = "songsheet", version, about = "Render playlists onto background images")]
pub struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Commands made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render one tall image, tiling the background's middle band.
    Image(render::ImageArgs),
    /// Render fixed-size pages inside a rectangle and bundle them as a zip.
    Pages(render::PagesArgs),
    /// Export the head/content/tail bands of a background.
    Split(split::SplitArgs),
    /// Print the wrapped lines without rendering.
    Wrap(wrap::WrapArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Image(args) => render::image(args),
        Command::Pages(args) => render::pages(args),
        Command::Split(args) => split::handle(args),
        Command::Wrap(args) => wrap::handle(args),
    }
}
