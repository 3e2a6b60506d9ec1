//! How `linkrank` prints results and failures.
//!
//! Commands hand a serializable payload plus two renderers to
//! [`render_mode`]; JSON needs no renderer because the payload is the
//! contract.
//!
//! The mode comes from the first of these that is set:
//! `--format` (or the hidden `--json`), then `LINKRANK_FORMAT`, then a
//! terminal check on stdout (pretty on a TTY, text otherwise).

use clap::ValueEnum;
use linkrank_core::AnalysisError;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

/// Columns in a section underline.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Column where pretty values start.
const KEY_COLUMN: usize = 22;

/// Dashed underline spanning [`PRETTY_RULE_WIDTH`] columns.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Heading line, underlined.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// `key:` padded to [`KEY_COLUMN`], then the value.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(
        w,
        "{:<width$} {}",
        format!("{key}:"),
        value.as_ref(),
        width = KEY_COLUMN
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Headed sections with aligned fields.
    Pretty,
    /// `name value` lines that grep and awk can split.
    Text,
    /// The report payload as pretty-printed JSON.
    Json,
}

impl OutputMode {
    fn from_env_value(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

fn pick_output_mode(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    format_env: Option<&str>,
    stdout_is_tty: bool,
) -> OutputMode {
    format_flag
        .or_else(|| json_flag.then_some(OutputMode::Json))
        .or_else(|| format_env.and_then(OutputMode::from_env_value))
        .unwrap_or(if stdout_is_tty {
            OutputMode::Pretty
        } else {
            OutputMode::Text
        })
}

/// Mode for this process: flags, then `LINKRANK_FORMAT`, then the stdout TTY check.
pub fn resolve_output_mode(format_flag: Option<OutputMode>, json_flag: bool) -> OutputMode {
    let format_env = std::env::var("LINKRANK_FORMAT").ok();
    pick_output_mode(
        format_flag,
        json_flag,
        format_env.as_deref(),
        io::stdout().is_terminal(),
    )
}

/// Write `value` to stdout. JSON serializes it directly; the other modes
/// call the matching renderer.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, &mut out)?,
        OutputMode::Pretty => pretty_fn(value, &mut out)?,
    }
    Ok(())
}

/// What a failed command reports on stderr.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    /// Next step for the user, when the failure has a known remedy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Stable `E####` code from [`AnalysisError::code`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl From<&AnalysisError> for CliError {
    fn from(err: &AnalysisError) -> Self {
        Self {
            message: err.to_string(),
            suggestion: err.hint().map(str::to_string),
            error_code: Some(err.code().to_string()),
        }
    }
}

/// Print `error` on stderr. JSON mode nests it under an `"error"` key.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    write_error(mode, error, &mut io::stderr().lock())?;
    Ok(())
}

fn write_error(mode: OutputMode, error: &CliError, out: &mut dyn Write) -> io::Result<()> {
    if mode == OutputMode::Json {
        serde_json::to_writer_pretty(&mut *out, &serde_json::json!({ "error": error }))?;
        return writeln!(out);
    }
    let label = error
        .error_code
        .as_deref()
        .map_or_else(|| "error".to_string(), |code| format!("error[{code}]"));
    writeln!(out, "{label}: {}", error.message)?;
    if let Some(suggestion) = &error.suggestion {
        writeln!(out, "  suggestion: {suggestion}")?;
    }
    Ok(())
}
