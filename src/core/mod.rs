pub mod executor;
pub mod manifest;
pub mod preprocess;
pub mod resolve;
pub mod runner;

pub use crate::domain::model::{
    ExecutionPlan, FoundScript, ManifestEntry, RunOutcome, RunSummary, ScriptOutcome,
};
pub use crate::domain::ports::{DbServer, Frontend, SqlSession};
pub use crate::utils::error::Result;
