use crate::domain::model::{ExecutionPlan, RunSummary};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Server-level database access: enough to check for / create the target
/// database and open a connection scoped to it.
#[async_trait]
pub trait DbServer: Send {
    type Session: SqlSession;

    async fn ping(&self) -> Result<()>;
    async fn list_databases(&self) -> Result<Vec<String>>;
    async fn create_database(&self, name: &str) -> Result<()>;
    async fn connect(&self, database: &str) -> Result<Self::Session>;
}

/// A single connection the executor drives statement by statement. The
/// commit discipline (autocommit on/off, explicit commit/rollback) is the
/// executor's responsibility, so it is exposed here rather than hidden
/// behind a transaction object.
#[async_trait]
pub trait SqlSession: Send {
    async fn execute(&mut self, statement: &str) -> Result<()>;
    async fn set_autocommit(&mut self, enabled: bool) -> Result<()>;
    async fn commit(&mut self) -> Result<()>;
    async fn rollback(&mut self) -> Result<()>;
}

/// The operator-facing boundary: progress notices, the validation report,
/// the continue-with-missing-scripts decision, and the final summary.
pub trait Frontend: Send {
    fn notice(&self, message: &str);
    fn show_plan(&self, plan: &ExecutionPlan);
    fn confirm(&self, question: &str) -> bool;
    fn script_finished(&self, name: &str, succeeded: bool);
    fn show_summary(&self, summary: &RunSummary);
}
