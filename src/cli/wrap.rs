//! Dry-run command printing wrapped lines (`songsheet wrap`).

use anyhow::Result;
use clap::Args;
use songsheet::Renderer;

use crate::cli::common::PlaylistArgs;
use crate::cli::utils::{load_labels, print_json};

/// Args for `songsheet wrap`.
#[derive(Args, Debug)]
pub struct WrapArgs {
    #[command(flatten)]
    pub playlist: PlaylistArgs,
    /// Print lines as a JSON array.
    #[arg(long)]
    pub json: bool,
}

pub fn handle(args: WrapArgs) -> Result<()> {
    let config = args.playlist.layout_config()?;
    let labels = load_labels(&args.playlist.playlist, args.playlist.order.into())?;
    let lines = Renderer::new(config).wrap(&labels)?;

    if args.json {
        let rendered: Vec<&str> = lines.iter().map(|line| line.display()).collect();
        return print_json(&rendered);
    }
    for (idx, line) in lines.iter().enumerate() {
        println!("{:>4} | {}", idx + 1, line.display());
    }
    Ok(())
}
