//! Error handling for lakehouse pipeline stages.
//!
//! Provides error types with context for tier file I/O, row parsing,
//! schema checks, and Polars query failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LakehouseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Input for {stage} stage not found at path: {path} (run the previous stages first)")]
    InputNotFound { stage: &'static str, path: PathBuf },

    #[error("Malformed raw row {row}: column '{column}' value '{value}' - {reason}")]
    MalformedRow {
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },

    #[error("Schema mismatch in file: {path} - missing columns: {}", .missing.join(", "))]
    SchemaMismatch { path: PathBuf, missing: Vec<String> },

    #[error("Failed to write tier file: {path} - {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, LakehouseError>;
