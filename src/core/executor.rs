use crate::domain::ports::SqlSession;
use crate::utils::error::{Result, RunnerError};
use std::path::Path;

/// Textual transaction-mode detection: the script is treated as carrying
/// its own transaction iff it mentions a begin keyword and an end keyword
/// anywhere in its (uppercased) text. Keywords inside string literals are
/// misclassified. Known limitation.
pub fn has_explicit_transaction(script_text: &str) -> bool {
    let upper = script_text.to_uppercase();
    (upper.contains("START TRANSACTION") || upper.contains("BEGIN"))
        && (upper.contains("COMMIT") || upper.contains("ROLLBACK"))
}

/// Splits a script into statements on `;`, dropping empty pieces. Not
/// SQL-aware: a `;` inside a string literal splits too. Known limitation.
pub fn split_statements(script_text: &str) -> Vec<&str> {
    script_text
        .split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .collect()
}

/// Executes one preprocessed script against the session. Scripts with an
/// explicit transaction run all-or-nothing under disabled autocommit;
/// scripts without one run statement by statement, each committed
/// individually, stopping at the first failure. An `Err` here is always a
/// single-script failure; the caller decides whether the run continues.
pub async fn execute_script<S: SqlSession>(
    session: &mut S,
    script_path: &Path,
    script_text: &str,
) -> Result<()> {
    tracing::debug!("Executing statements from: {}", script_path.display());

    let statements = split_statements(script_text);

    if has_explicit_transaction(script_text) {
        tracing::debug!("Script contains explicit transaction - executing as single block");
        let result = execute_as_transaction(session, &statements).await;
        // Autocommit must come back on regardless of how the script went.
        let restore = session.set_autocommit(true).await;
        match result {
            Ok(()) => {
                restore?;
                tracing::info!(
                    "Successfully executed script with explicit transaction from {}",
                    script_path.display()
                );
                Ok(())
            }
            Err(e) => {
                if let Err(restore_err) = restore {
                    tracing::error!("Failed to restore autocommit: {}", restore_err);
                }
                tracing::error!(
                    "Error executing script with explicit transaction in {}:\n{}",
                    script_path.display(),
                    e
                );
                Err(e)
            }
        }
    } else {
        tracing::debug!("Script has no explicit transaction - executing statement by statement");
        execute_statement_by_statement(session, &statements, script_path).await?;
        tracing::info!(
            "Successfully executed {} statements from {}",
            statements.len(),
            script_path.display()
        );
        Ok(())
    }
}

async fn execute_as_transaction<S: SqlSession>(
    session: &mut S,
    statements: &[&str],
) -> Result<()> {
    session.set_autocommit(false).await?;

    for statement in statements {
        if let Err(e) = session.execute(statement).await {
            if let Err(rollback_err) = session.rollback().await {
                tracing::error!("Rollback failed: {}", rollback_err);
            }
            return Err(statement_error(statement, e));
        }
    }

    session.commit().await?;
    Ok(())
}

async fn execute_statement_by_statement<S: SqlSession>(
    session: &mut S,
    statements: &[&str],
    script_path: &Path,
) -> Result<()> {
    for (i, statement) in statements.iter().enumerate() {
        tracing::debug!(
            "Executing statement {}/{}: {}...",
            i + 1,
            statements.len(),
            truncate(statement, 50)
        );

        match session.execute(statement).await {
            Ok(()) => session.commit().await?,
            Err(e) => {
                if let Err(rollback_err) = session.rollback().await {
                    tracing::error!("Rollback failed: {}", rollback_err);
                }
                tracing::error!(
                    "Error executing statement in {}:\n{}\nError: {}",
                    script_path.display(),
                    statement,
                    e
                );
                return Err(statement_error(statement, e));
            }
        }
    }

    Ok(())
}

fn statement_error(statement: &str, source: RunnerError) -> RunnerError {
    RunnerError::StatementError {
        statement: statement.to_string(),
        message: source.to_string(),
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Session that stages statements until commit, like a transactional
    /// connection would. Statements containing "BAD" fail.
    #[derive(Default)]
    struct MockSession {
        autocommit_calls: Vec<bool>,
        staged: Vec<String>,
        committed: Vec<String>,
        rollbacks: usize,
        executed: Vec<String>,
    }

    #[async_trait]
    impl SqlSession for MockSession {
        async fn execute(&mut self, statement: &str) -> Result<()> {
            self.executed.push(statement.to_string());
            if statement.contains("BAD") {
                return Err(RunnerError::StatementError {
                    statement: statement.to_string(),
                    message: "syntax error".to_string(),
                });
            }
            self.staged.push(statement.to_string());
            Ok(())
        }

        async fn set_autocommit(&mut self, enabled: bool) -> Result<()> {
            self.autocommit_calls.push(enabled);
            Ok(())
        }

        async fn commit(&mut self) -> Result<()> {
            self.committed.append(&mut self.staged);
            Ok(())
        }

        async fn rollback(&mut self) -> Result<()> {
            self.staged.clear();
            self.rollbacks += 1;
            Ok(())
        }
    }

    #[test]
    fn detects_explicit_transactions() {
        assert!(has_explicit_transaction(
            "START TRANSACTION; INSERT INTO t VALUES (1); COMMIT;"
        ));
        assert!(has_explicit_transaction("begin; delete from t; rollback;"));
        // Begin without a matching end, or vice versa, is not explicit.
        assert!(!has_explicit_transaction("BEGIN; INSERT INTO t VALUES (1);"));
        assert!(!has_explicit_transaction("INSERT INTO t VALUES (1); COMMIT;"));
        assert!(!has_explicit_transaction("INSERT INTO t VALUES (1);"));
    }

    #[test]
    fn splits_on_semicolons_dropping_empties() {
        let stmts = split_statements("SELECT 1;\n  SELECT 2  ;;\n;SELECT 3");
        assert_eq!(stmts, vec!["SELECT 1", "SELECT 2", "SELECT 3"]);
        assert!(split_statements("  ;;  ").is_empty());
    }

    #[tokio::test]
    async fn explicit_transaction_commits_everything_once() {
        let mut session = MockSession::default();
        let script = "START TRANSACTION;\nINSERT INTO t VALUES (1);\nINSERT INTO t VALUES (2);\nCOMMIT;";

        execute_script(&mut session, Path::new("a.sql"), script)
            .await
            .unwrap();

        assert_eq!(session.committed.len(), 4);
        assert!(session.staged.is_empty());
        assert_eq!(session.autocommit_calls, vec![false, true]);
    }

    #[tokio::test]
    async fn failed_explicit_transaction_leaves_no_effects() {
        let mut session = MockSession::default();
        let script = "START TRANSACTION; INSERT INTO t VALUES (1); BAD SQL; COMMIT;";

        let err = execute_script(&mut session, Path::new("a.sql"), script)
            .await
            .unwrap_err();

        assert!(matches!(err, RunnerError::StatementError { .. }));
        assert!(session.committed.is_empty());
        assert_eq!(session.rollbacks, 1);
        // Statements after the failing one never run.
        assert_eq!(session.executed.last().unwrap(), "BAD SQL");
        // Autocommit is restored even on failure.
        assert_eq!(session.autocommit_calls, vec![false, true]);
    }

    #[tokio::test]
    async fn implicit_mode_commits_each_statement() {
        let mut session = MockSession::default();
        let script = "INSERT INTO t VALUES (1); INSERT INTO t VALUES (2);";

        execute_script(&mut session, Path::new("a.sql"), script)
            .await
            .unwrap();

        assert_eq!(session.committed.len(), 2);
        assert!(session.autocommit_calls.is_empty());
    }

    #[tokio::test]
    async fn implicit_mode_keeps_prior_commits_on_failure() {
        let mut session = MockSession::default();
        let script = "INSERT INTO t VALUES (1); BAD SQL; INSERT INTO t VALUES (3);";

        let err = execute_script(&mut session, Path::new("a.sql"), script)
            .await
            .unwrap_err();

        assert!(matches!(err, RunnerError::StatementError { .. }));
        // Statement 1 stays committed, statement 3 never executes.
        assert_eq!(session.committed, vec!["INSERT INTO t VALUES (1)"]);
        assert_eq!(session.executed.len(), 2);
        assert_eq!(session.rollbacks, 1);
    }
}
