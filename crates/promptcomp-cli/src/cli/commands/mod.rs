//! CLI command handlers.

pub mod config;
pub mod copy;
pub mod export;
pub mod format;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Reads the response text from `path`, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read input from {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read input from stdin")?;
            Ok(buf)
        }
    }
}
