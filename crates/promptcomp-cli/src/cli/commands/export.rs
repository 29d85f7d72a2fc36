//! Export command handler.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use promptcomp_core::config::ExportConfig;
use promptcomp_core::export::{ComparisonExport, PromptComparison, PromptComparisonFile};

pub struct PromptExportArgs {
    pub params: PathBuf,
    pub left_response: PathBuf,
    pub right_response: PathBuf,
    pub template: Option<String>,
    pub out: Option<PathBuf>,
}

pub fn run(left: &Path, right: &Path, out: Option<PathBuf>, config: &ExportConfig) -> Result<()> {
    let left_content = std::fs::read_to_string(left)
        .with_context(|| format!("read left side from {}", left.display()))?;
    let right_content = std::fs::read_to_string(right)
        .with_context(|| format!("read right side from {}", right.display()))?;

    let comparison = ComparisonExport::new(
        left_content,
        right_content,
        config.preformatted_marker.as_str(),
    );
    let dir = out.unwrap_or_else(|| config.effective_output_dir());
    let path = comparison.write_to(&dir)?;
    println!("{}", path.display());
    Ok(())
}

pub fn run_prompts(args: &PromptExportArgs, config: &ExportConfig) -> Result<()> {
    let mut params = PromptComparisonFile::load(&args.params)?;
    if let Some(template) = &args.template {
        params.template_name = Some(template.clone());
    }
    let left_response = std::fs::read_to_string(&args.left_response).with_context(|| {
        format!("read left response from {}", args.left_response.display())
    })?;
    let right_response = std::fs::read_to_string(&args.right_response).with_context(|| {
        format!("read right response from {}", args.right_response.display())
    })?;

    let comparison = PromptComparison::new(params, left_response, right_response);
    let dir = args
        .out
        .clone()
        .unwrap_or_else(|| config.effective_output_dir());
    let path = comparison.write_to(&dir)?;
    println!("{}", path.display());
    Ok(())
}
