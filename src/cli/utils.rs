//! Convenience helpers shared across command handlers.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use songsheet::{Label, LabelOrder, order_labels, parse_playlist};

/// Read a playlist file (or stdin for `-`) into ordered labels.
pub fn load_labels(path: &Path, order: LabelOrder) -> Result<Vec<Label>> {
    let text = if path.as_os_str() == "-" {
        read_stdin()?
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };
    Ok(order_labels(parse_playlist(&text), order))
}

/// Read the entire stdin stream into memory.
pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read from stdin")?;
    Ok(buffer)
}

pub fn read_background(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read background {}", path.display()))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}
