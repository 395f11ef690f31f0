pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::console::ConsoleFrontend;
pub use crate::adapters::mysql::MySqlServer;
pub use crate::config::{CliConfig, Settings};
pub use crate::core::runner::{RunConfig, ScriptRunner};
pub use crate::domain::model::{RunOutcome, RunSummary};
pub use crate::utils::error::{Result, RunnerError};
