//! Side-by-side comparison exports as markdown documents.
//!
//! - `ComparisonExport`: two rendered responses, new version against reference
//! - `PromptComparison`: two prompt setups (model, sampling, messages) with
//!   the response each produced

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Two responses to compare, plus the moment the comparison was taken.
#[derive(Debug, Clone)]
pub struct ComparisonExport {
    pub left: String,
    pub right: String,
    pub generated_at: DateTime<Local>,
    /// Right content starting with this marker is embedded verbatim.
    pub preformatted_marker: String,
}

impl ComparisonExport {
    pub fn new(
        left: impl Into<String>,
        right: impl Into<String>,
        preformatted_marker: impl Into<String>,
    ) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            generated_at: Local::now(),
            preformatted_marker: preformatted_marker.into(),
        }
    }

    /// True when the right side already carries its own markdown structure.
    pub fn right_is_preformatted(&self) -> bool {
        !self.preformatted_marker.is_empty() && self.right.starts_with(&self.preformatted_marker)
    }

    pub fn to_markdown(&self) -> String {
        let right = if self.right_is_preformatted() {
            self.right.clone()
        } else {
            fenced(&self.right)
        };

        format!(
            "# Markdown Comparison\n\n\
             ## Date\n{date}\n\n\
             ## Left Side (New Version)\n{left}\n\n\
             ## Right Side (Reference)\n{right}\n",
            date = self.generated_at.format("%Y-%m-%d %H:%M:%S"),
            left = fenced(&self.left),
        )
    }

    pub fn file_name(&self) -> String {
        format!("comparison_{}.md", self.generated_at.format("%Y%m%d_%H%M%S"))
    }

    /// Writes the document into `dir` and returns the file path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        write_document(dir, &self.file_name(), &self.to_markdown())
    }
}

/// Settings and messages for one side of a prompt comparison.
///
/// Keys other than the named fields are kept in `extra` and listed under
/// "Additional Parameters".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptParams {
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub system_message: String,
    pub user_message: String,
    pub assistant_message: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

impl PromptParams {
    pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
    pub const DEFAULT_TEMPERATURE: f64 = 0.7;
    pub const DEFAULT_MAX_TOKENS: u32 = 500;

    pub fn effective_model(&self) -> &str {
        self.model.as_deref().unwrap_or(Self::DEFAULT_MODEL)
    }

    pub fn effective_temperature(&self) -> f64 {
        self.temperature.unwrap_or(Self::DEFAULT_TEMPERATURE)
    }

    pub fn effective_max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(Self::DEFAULT_MAX_TOKENS)
    }
}

/// Params file layout: an optional template name plus `[left]` and `[right]`
/// tables of [`PromptParams`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptComparisonFile {
    pub template_name: Option<String>,
    pub left: PromptParams,
    pub right: PromptParams,
}

impl PromptComparisonFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read params from {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse params from {}", path.display()))
    }
}

/// Two prompt setups and their responses.
#[derive(Debug, Clone)]
pub struct PromptComparison {
    pub template_name: String,
    /// Previous setup.
    pub left: PromptParams,
    pub left_response: String,
    /// Current setup.
    pub right: PromptParams,
    pub right_response: String,
    pub generated_at: DateTime<Local>,
}

impl PromptComparison {
    pub const DEFAULT_TEMPLATE_NAME: &str = "comparison";

    pub fn new(
        params: PromptComparisonFile,
        left_response: impl Into<String>,
        right_response: impl Into<String>,
    ) -> Self {
        Self {
            template_name: params
                .template_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| Self::DEFAULT_TEMPLATE_NAME.to_string()),
            left: params.left,
            left_response: left_response.into(),
            right: params.right,
            right_response: right_response.into(),
            generated_at: Local::now(),
        }
    }

    pub fn has_additional_params(&self) -> bool {
        !self.left.extra.is_empty() || !self.right.extra.is_empty()
    }

    pub fn to_markdown(&self) -> String {
        let mut md = format!(
            "# Prompt Comparison: {name}\n\n## Date\n{date}\n\n",
            name = self.template_name,
            date = self.generated_at.format("%Y-%m-%d %H:%M:%S"),
        );
        push_prompt_side(&mut md, "Left Side (Previous)", &self.left, &self.left_response);
        md.push('\n');
        push_prompt_side(&mut md, "Right Side (Current)", &self.right, &self.right_response);

        if self.has_additional_params() {
            md.push_str("\n## Additional Parameters\n");
            md.push_str("\n### Left Side (Previous)\n");
            push_extras(&mut md, &self.left.extra);
            md.push_str("\n### Right Side (Current)\n");
            push_extras(&mut md, &self.right.extra);
        }
        md
    }

    /// `comparison_<template name, spaces as underscores>_<timestamp>.md`
    pub fn file_name(&self) -> String {
        format!(
            "comparison_{}_{}.md",
            self.template_name.replace(' ', "_"),
            self.generated_at.format("%Y%m%d_%H%M%S")
        )
    }

    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        write_document(dir, &self.file_name(), &self.to_markdown())
    }
}

fn push_prompt_side(md: &mut String, title: &str, params: &PromptParams, response: &str) {
    let _ = write!(
        md,
        "## {title}\n\
         - **Model**: {model}\n\
         - **Temperature**: {temperature}\n\
         - **Max Tokens**: {max_tokens}\n\n\
         ### System Message\n{system}\n\n\
         ### User Message\n{user}\n\n\
         ### Assistant Message\n{assistant}\n\n\
         ### Response\n{response}\n",
        model = params.effective_model(),
        temperature = params.effective_temperature(),
        max_tokens = params.effective_max_tokens(),
        system = plain_fence(&params.system_message),
        user = plain_fence(&params.user_message),
        assistant = plain_fence(&params.assistant_message),
        response = plain_fence(response),
    );
}

fn push_extras(md: &mut String, extra: &BTreeMap<String, toml::Value>) {
    for (key, value) in extra {
        let value = match value {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let _ = writeln!(md, "- **{key}**: {value}");
    }
}

fn write_document(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    let path = dir.join(file_name);
    fs::write(&path, content)
        .with_context(|| format!("Failed to write comparison to {}", path.display()))?;
    tracing::info!(path = %path.display(), "comparison exported");
    Ok(path)
}

fn fenced(content: &str) -> String {
    format!("```markdown\n{content}\n```")
}

fn plain_fence(content: &str) -> String {
    format!("```\n{content}\n```")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tempfile::tempdir;

    use super::*;

    fn export(left: &str, right: &str) -> ComparisonExport {
        ComparisonExport {
            left: left.to_string(),
            right: right.to_string(),
            generated_at: Local.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap(),
            preformatted_marker: "# Reference Response".to_string(),
        }
    }

    #[test]
    fn test_both_sides_fenced() {
        let md = export("new text", "old text").to_markdown();
        assert_eq!(
            md,
            "# Markdown Comparison\n\n## Date\n2025-03-14 09:26:53\n\n\
             ## Left Side (New Version)\n```markdown\nnew text\n```\n\n\
             ## Right Side (Reference)\n```markdown\nold text\n```\n"
        );
    }

    #[test]
    fn test_preformatted_right_side_embedded() {
        let right = "# Reference Response\n\n| a | b |\n|---|---|";
        let md = export("left", right).to_markdown();
        assert!(md.ends_with(&format!("## Right Side (Reference)\n{right}\n")));
        assert_eq!(md.matches("```markdown").count(), 1);
    }

    #[test]
    fn test_empty_marker_never_matches() {
        let mut cmp = export("l", "r");
        cmp.preformatted_marker.clear();
        assert!(!cmp.right_is_preformatted());
    }

    #[test]
    fn test_file_name_uses_timestamp() {
        assert_eq!(export("", "").file_name(), "comparison_20250314_092653.md");
    }

    fn prompt_comparison(params: &str) -> PromptComparison {
        let file: PromptComparisonFile = toml::from_str(params).unwrap();
        let mut cmp = PromptComparison::new(file, "old answer", "new answer");
        cmp.generated_at = Local.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        cmp
    }

    #[test]
    fn test_prompt_comparison_defaults() {
        let md = prompt_comparison("").to_markdown();
        assert!(md.starts_with("# Prompt Comparison: comparison\n\n## Date\n2025-03-14 09:26:53\n"));
        assert_eq!(md.matches("- **Model**: gpt-3.5-turbo\n").count(), 2);
        assert_eq!(md.matches("- **Temperature**: 0.7\n").count(), 2);
        assert_eq!(md.matches("- **Max Tokens**: 500\n").count(), 2);
        assert!(md.contains("## Left Side (Previous)\n"));
        assert!(md.contains("### Response\n```\nold answer\n```\n\n## Right Side (Current)\n"));
        assert!(md.ends_with("### Response\n```\nnew answer\n```\n"));
        assert!(!md.contains("Additional Parameters"));
    }

    #[test]
    fn test_prompt_comparison_messages_fenced() {
        let md = prompt_comparison(
            "[left]\nmodel = \"gpt-4o\"\ntemperature = 0.2\nmax_tokens = 900\n\
             system_message = \"Be terse.\"\nuser_message = \"Summarize\"\n",
        )
        .to_markdown();
        assert!(md.contains("- **Model**: gpt-4o\n- **Temperature**: 0.2\n- **Max Tokens**: 900\n"));
        assert!(md.contains("### System Message\n```\nBe terse.\n```\n"));
        assert!(md.contains("### User Message\n```\nSummarize\n```\n"));
        assert!(md.contains("### Assistant Message\n```\n\n```\n"));
    }

    #[test]
    fn test_additional_params_only_when_present() {
        let cmp = prompt_comparison("[right]\ntop_p = 0.9\nstop = \"END\"\n");
        assert!(cmp.has_additional_params());
        let md = cmp.to_markdown();
        assert!(md.ends_with(
            "\n## Additional Parameters\n\n### Left Side (Previous)\n\n\
             ### Right Side (Current)\n- **stop**: END\n- **top_p**: 0.9\n"
        ));

        let plain = prompt_comparison("[left]\nmodel = \"gpt-4o\"\n");
        assert!(!plain.has_additional_params());
        assert!(!plain.to_markdown().contains("Additional Parameters"));
    }

    #[test]
    fn test_prompt_file_name_uses_template_name() {
        let cmp = prompt_comparison("template_name = \"Support reply v2\"\n");
        assert_eq!(cmp.file_name(), "comparison_Support_reply_v2_20250314_092653.md");
        assert!(cmp.to_markdown().starts_with("# Prompt Comparison: Support reply v2\n"));

        assert_eq!(
            prompt_comparison("").file_name(),
            "comparison_comparison_20250314_092653.md"
        );
    }

    #[test]
    fn test_prompt_params_file_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.toml");
        fs::write(&path, "[left]\nmax_tokens = 42\nseed = 7\n").unwrap();

        let file = PromptComparisonFile::load(&path).unwrap();
        assert_eq!(file.left.effective_max_tokens(), 42);
        assert_eq!(file.left.extra.get("seed"), Some(&toml::Value::Integer(7)));
        assert!(file.right.extra.is_empty());

        fs::write(&path, "[left]\nmax_tokens = \"many\"\n").unwrap();
        assert!(PromptComparisonFile::load(&path).is_err());
    }

    #[test]
    fn test_write_to_creates_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("exports");
        let cmp = export("l", "r");

        let path = cmp.write_to(&out).unwrap();

        assert_eq!(path, out.join("comparison_20250314_092653.md"));
        assert_eq!(fs::read_to_string(&path).unwrap(), cmp.to_markdown());
    }
}
