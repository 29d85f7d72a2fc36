//! Format and classify command handlers.

use std::path::Path;

use anyhow::Result;
use promptcomp_core::{FormatOptions, ResponseFormatter, TableDetection, format_for_display};

use super::read_input;

pub fn format(input: Option<&Path>, options: &FormatOptions, display: bool) -> Result<()> {
    let raw = read_input(input)?;
    let html = if display {
        format_for_display(&raw)
    } else {
        ResponseFormatter::new(*options).format(&raw)
    };
    println!("{html}");
    Ok(())
}

pub fn classify(input: Option<&Path>, detection: TableDetection) -> Result<()> {
    let raw = read_input(input)?;
    println!("{}", promptcomp_core::classify(&raw, detection));
    Ok(())
}
