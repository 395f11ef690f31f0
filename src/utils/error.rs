use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Manifest file not found: {0}")]
    ManifestNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Database error: {0}")]
    SqlError(#[from] sqlx::Error),

    #[error("Failed to create database '{name}': {message}")]
    DatabaseCreateError { name: String, message: String },

    #[error("Failed to connect to MySQL server: {message}")]
    ConnectError { message: String },

    #[error("Cannot read script {path}: {message}")]
    ScriptReadError { path: PathBuf, message: String },

    #[error("Error executing statement:\n{statement}\nError: {message}")]
    StatementError { statement: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

pub type Result<T> = std::result::Result<T, RunnerError>;
