use crate::utils::error::{Result, RunnerError};
use std::fs;
use std::path::Path;

/// Database name the legacy scripts were authored against. Replaced with
/// the run's target database before execution.
pub const LEGACY_DB_TOKEN: &str = "kupathairnew";

/// Reads a script and retargets it at `target_db`: every occurrence of the
/// legacy database name is substituted, and every `USE ...` line is
/// replaced with a canonical `USE` of the target database. The file on
/// disk is never modified.
pub fn rewrite_script(script_path: &Path, target_db: &str) -> Result<String> {
    let content =
        fs::read_to_string(script_path).map_err(|e| RunnerError::ScriptReadError {
            path: script_path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(rewrite_script_text(&content, target_db))
}

pub fn rewrite_script_text(content: &str, target_db: &str) -> String {
    // Plain substring replacement; identical substrings elsewhere in the
    // script are substituted too. Known limitation.
    let content = content.replace(LEGACY_DB_TOKEN, target_db);

    let rewritten: Vec<String> = content
        .split('\n')
        .map(|line| {
            if line.trim().to_uppercase().starts_with("USE ") {
                let replacement = format!("USE `{}`;", target_db);
                tracing::debug!("Replaced USE command with: {}", replacement);
                replacement
            } else {
                line.to_string()
            }
        })
        .collect();

    rewritten.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_legacy_token_everywhere() {
        let script = "CREATE TABLE kupathairnew.users (id INT);\nINSERT INTO kupathairnew.users VALUES (1);";
        let out = rewrite_script_text(script, "newdb");
        assert!(!out.contains(LEGACY_DB_TOKEN));
        assert_eq!(
            out,
            "CREATE TABLE newdb.users (id INT);\nINSERT INTO newdb.users VALUES (1);"
        );
    }

    #[test]
    fn normalizes_use_lines_regardless_of_case_and_quoting() {
        for line in ["USE olddb;", "use olddb;", "Use `olddb`;", "  USE olddb"] {
            let out = rewrite_script_text(line, "newdb");
            assert_eq!(out, "USE `newdb`;");
        }
    }

    #[test]
    fn non_use_lines_pass_through_with_line_breaks() {
        let script = "USE olddb;\nSELECT 1;\n\nSELECT 2;";
        let out = rewrite_script_text(script, "newdb");
        assert_eq!(out, "USE `newdb`;\nSELECT 1;\n\nSELECT 2;");
    }

    #[test]
    fn use_keyword_needs_a_trailing_space() {
        // "USES" and a bare "USE" are not USE statements.
        assert_eq!(rewrite_script_text("USES olddb;", "newdb"), "USES olddb;");
        assert_eq!(rewrite_script_text("USE", "newdb"), "USE");
    }

    #[test]
    fn rewrite_is_idempotent() {
        let script = "use kupathairnew;\nSELECT * FROM kupathairnew.t;";
        let once = rewrite_script_text(script, "newdb");
        let twice = rewrite_script_text(&once, "newdb");
        assert_eq!(once, twice);
    }

    #[test]
    fn unreadable_script_is_a_read_error() {
        let err = rewrite_script(Path::new("/nonexistent/a.sql"), "newdb").unwrap_err();
        assert!(matches!(err, RunnerError::ScriptReadError { .. }));
    }
}
