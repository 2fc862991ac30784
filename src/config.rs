//! Configuration management and validation.
//!
//! Provides the pipeline configuration: lakehouse root, Parquet
//! compression, malformed row handling and monetary rounding.

use crate::constants::{DEFAULT_MONEY_DECIMALS, DEFAULT_ROOT};
use crate::error::{LakehouseError, Result};
use crate::models::LakehousePaths;
use clap::ValueEnum;
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

/// What the cleaning stage does with a raw row whose fields cannot be cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum MalformedRowPolicy {
    /// Drop the row, log it and keep going
    Reject,
    /// Fail the stage before anything is written
    Abort,
}

/// Global configuration for a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LakehouseConfig {
    /// Directory holding the bronze, silver and gold tiers
    pub root: PathBuf,

    /// Compression used for silver and gold Parquet files
    pub compression: CompressionAlgorithm,

    /// Handling of raw rows that fail type coercion
    pub malformed_rows: MalformedRowPolicy,

    /// Decimal places for rounded revenue figures
    pub money_decimals: u32,

    /// Suppress stage banners and the run summary
    pub quiet: bool,
}

impl Default for LakehouseConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            compression: CompressionAlgorithm::Snappy,
            malformed_rows: MalformedRowPolicy::Reject,
            money_decimals: DEFAULT_MONEY_DECIMALS,
            quiet: false,
        }
    }
}

impl LakehouseConfig {
    /// Create configuration rooted at a custom directory
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Set the parquet compression algorithm
    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.compression = compression;
        self
    }

    /// Set the malformed row policy
    pub fn with_malformed_rows(mut self, policy: MalformedRowPolicy) -> Self {
        self.malformed_rows = policy;
        self
    }

    /// Set the number of decimals kept in monetary aggregates
    pub fn with_money_decimals(mut self, decimals: u32) -> Self {
        self.money_decimals = decimals;
        self
    }

    /// Suppress console banners
    pub fn with_quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Tier file locations under the configured root
    pub fn paths(&self) -> LakehousePaths {
        LakehousePaths::from_root(&self.root)
    }

    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(LakehouseError::Configuration {
                message: "lakehouse root must not be empty".to_string(),
            });
        }

        // 10^decimals must stay exactly representable in an f64
        if self.money_decimals > 15 {
            return Err(LakehouseError::Configuration {
                message: format!(
                    "money_decimals must be at most 15, got {}",
                    self.money_decimals
                ),
            });
        }

        Ok(())
    }
}
