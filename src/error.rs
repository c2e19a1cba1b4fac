//! Application error type shared by the stores and the CLI entry point.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to write configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Failed to parse break data: {0}")]
    DataParse(#[from] serde_json::Error),

    #[error("Email error: {0}")]
    Mail(String),
}

pub type AppResult<T> = Result<T, AppError>;
