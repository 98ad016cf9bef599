//! Render the sparse clone plan without running it

use core::str::FromStr;

use crate::error::FetchError;
use crate::git::GitInvocation;
use anyhow::Result;

/// Output format for the dry-run plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OutputFormat {
    /// One shell-escaped git command per line
    #[default]
    Shell,
    /// JSON array of invocations
    Json,
}

impl FromStr for OutputFormat {
    type Err = FetchError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "shell" => Ok(Self::Shell),
            "json" => Ok(Self::Json),
            _ => Err(FetchError::configuration(format!(
                "Invalid format: {s}. Use 'shell' or 'json'"
            ))),
        }
    }
}

/// Render invocations in the requested format
///
/// # Errors
///
/// Returns an error if:
/// - The invocations cannot be serialized to JSON
#[inline]
pub fn render_plan(invocations: &[GitInvocation], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Shell => Ok(format_as_shell(invocations)),
        OutputFormat::Json => format_as_json(invocations),
    }
}

/// Format invocations as shell commands, one per line
///
/// A working directory is expressed with `git -C <dir>` so each line can be
/// pasted on its own.
fn format_as_shell(invocations: &[GitInvocation]) -> String {
    invocations
        .iter()
        .map(|invocation| {
            let mut words = vec!["git".to_owned()];
            if let Some(dir) = invocation.working_dir.as_ref() {
                words.push("-C".to_owned());
                words.push(shell_escape(&dir.to_string_lossy()));
            }
            words.extend(invocation.args.iter().map(|arg| shell_escape(arg)));
            words.join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format invocations as a JSON array
fn format_as_json(invocations: &[GitInvocation]) -> Result<String> {
    serde_json::to_string_pretty(invocations)
        .map_err(|e| anyhow::anyhow!("Failed to serialize to JSON: {e}"))
}

/// Escape a string for shell execution
/// Uses double quotes for safety, escaping special characters inside
fn shell_escape(s: &str) -> String {
    if !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/' | '.' | ':' | '=')
        })
    {
        return s.to_owned();
    }

    let mut result = String::from('"');
    for ch in s.chars() {
        match ch {
            '"' => result.push_str(r#"\""#),
            '\\' => result.push_str(r"\\"),
            '$' => result.push_str(r"\$"),
            '`' => result.push_str(r"\`"),
            _ => result.push(ch),
        }
    }
    result.push('"');
    result
}
