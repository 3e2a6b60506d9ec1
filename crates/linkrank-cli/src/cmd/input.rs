//! Loading crawl records and analysis config from disk.
//!
//! Records are either a JSON array of page records or, for files with a
//! `.jsonl` extension, one record per line. The path `-` reads stdin as a
//! JSON array.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use linkrank_core::{AnalysisConfig, PageRecord};
use tracing::{debug, info};

/// Read page records from `path` (or stdin when `path` is `-`).
///
/// # Errors
///
/// Returns an error if the file cannot be read or a record is malformed.
pub fn load_records(path: &Path) -> Result<Vec<PageRecord>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read records from <stdin>")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read records from {}", records_label(path)))?
    };

    let records = if is_jsonl(path) {
        parse_jsonl(&content)
            .with_context(|| format!("invalid JSON Lines in {}", records_label(path)))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid record array in {}", records_label(path)))?
    };

    info!(source = %records_label(path), records = records.len(), "loaded page records");
    Ok(records)
}

fn records_label(path: &Path) -> String {
    if path == Path::new("-") {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

fn is_jsonl(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"))
}

fn parse_jsonl(content: &str) -> Result<Vec<PageRecord>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| format!("line {}", i + 1))
        })
        .collect()
}

/// Load an [`AnalysisConfig`] from a TOML file, or the defaults when no
/// file is given. The result is not validated.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or an
/// [`linkrank_core::AnalysisError::ConfigParse`] if it is not valid TOML.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = AnalysisConfig::from_toml_str(&content)?;
    debug!(path = %path.display(), ?config, "loaded analysis config");
    Ok(config)
}
