//! Shared input handling for commands that read a file, an argument, or stdin.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Reads `path`, or stdin when it is absent or `-`.
pub fn read_file_or_stdin(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => read_stdin(),
    }
}

/// Returns `value`, or reads stdin when it is absent or `-`.
pub fn value_or_stdin(value: Option<&str>) -> Result<String> {
    match value {
        Some(value) if value != "-" => Ok(value.to_string()),
        _ => read_stdin(),
    }
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf)
}
