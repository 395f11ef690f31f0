use crate::domain::model::ManifestEntry;
use crate::utils::error::{Result, RunnerError};
use std::fs;
use std::path::Path;

/// Only files with this extension are accepted from the manifest.
pub const SCRIPT_EXTENSION: &str = ".sql";

/// Group used for manifest lines that carry a bare file name with no path.
pub const FALLBACK_GROUP: &str = "scripts";

/// Reads the execution-order manifest and returns its entries in line
/// order. Lines may carry an optional numeric ordinal (`1. `, `1<tab>` or
/// `1 `); comments start with `#` or `//`. Malformed lines are skipped
/// with a warning, never an error. Repeated entries are kept as-is.
pub fn parse_manifest(manifest_path: &Path) -> Result<Vec<ManifestEntry>> {
    tracing::info!("Parsing execution order file: {}", manifest_path.display());

    if !manifest_path.exists() {
        tracing::error!("Order file not found: {}", manifest_path.display());
        return Err(RunnerError::ManifestNotFound(manifest_path.to_path_buf()));
    }

    let text = fs::read_to_string(manifest_path)?;
    let entries = parse_manifest_text(&text);

    tracing::info!("Parsed {} scripts from order file", entries.len());
    Ok(entries)
}

pub fn parse_manifest_text(text: &str) -> Vec<ManifestEntry> {
    let mut entries = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line_num = index + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }

        if !line.ends_with(SCRIPT_EXTENSION) {
            tracing::warn!("Line {}: '{}' does not end with .sql - skipping", line_num, line);
            continue;
        }

        let clean_line = strip_ordinal(line);
        let (group, filename) = split_group_and_filename(clean_line);

        // Re-check after ordinal stripping: a prefix that looked like an
        // ordinal can consume part of a legitimate name.
        if !filename.ends_with(SCRIPT_EXTENSION) {
            tracing::warn!("Line {}: '{}' is not a SQL file - skipping", line_num, filename);
            continue;
        }

        tracing::debug!("Line {}: Added [{}] {}", line_num, group, filename);
        entries.push(ManifestEntry { group, filename });
    }

    entries
}

/// Drops a leading numeric ordinal. The three recognised forms are checked
/// in fixed priority (`". "`, then tab, then space) and only the first form
/// present in the line is considered, even if its prefix turns out not to
/// be numeric.
fn strip_ordinal(line: &str) -> &str {
    let stripped = if let Some((prefix, rest)) = line.split_once(". ") {
        if is_numeric_ordinal(prefix) {
            rest
        } else {
            line
        }
    } else if let Some((prefix, rest)) = line.split_once('\t') {
        if is_numeric_ordinal(prefix) {
            rest
        } else {
            line
        }
    } else if let Some((prefix, rest)) = line.split_once(' ') {
        if is_numeric_ordinal(prefix) {
            rest
        } else {
            line
        }
    } else {
        line
    };

    stripped.trim()
}

fn is_numeric_ordinal(prefix: &str) -> bool {
    let prefix = prefix.trim();
    !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit())
}

/// Splits a manifest path into its group (second-to-last segment) and file
/// name. Forward and backward slashes are both treated as separators; a
/// bare file name falls back to [`FALLBACK_GROUP`].
fn split_group_and_filename(clean_line: &str) -> (String, String) {
    if clean_line.contains('/') || clean_line.contains('\\') {
        let normalized = clean_line.replace('\\', "/");
        let segments: Vec<&str> = normalized.split('/').collect();
        if segments.len() >= 2 {
            let group = segments[segments.len() - 2].to_string();
            let filename = segments[segments.len() - 1].to_string();
            return (group, filename);
        }
    }
    (FALLBACK_GROUP.to_string(), clean_line.to_string())
}
