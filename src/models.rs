//! Core data structures and types for the lakehouse pipeline.
//!
//! Defines order records for each tier, the on-disk tier layout,
//! and the statistics each stage reports.

use crate::constants::{
    AGGREGATE_FILE_NAME, BRONZE_DIR_NAME, CLEAN_FILE_NAME, GOLD_DIR_NAME, RAW_FILE_NAME,
    SILVER_DIR_NAME,
};
use crate::error::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Bronze,
    Silver,
    Gold,
    Report,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Bronze => "bronze",
            Stage::Silver => "silver",
            Stage::Gold => "gold",
            Stage::Report => "report",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Order as ingested, before any validation
///
/// Country may be blank, quantity may be zero or negative and the unit
/// price may be missing. Nothing is enforced at this tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOrder {
    pub order_id: i64,
    pub ts: String,
    pub country: String,
    pub product: String,
    pub qty: i32,
    pub unit_price: Option<f64>,
}

impl RawOrder {
    pub fn new(
        order_id: i64,
        ts: &str,
        country: &str,
        product: &str,
        qty: i32,
        unit_price: Option<f64>,
    ) -> Self {
        Self {
            order_id,
            ts: ts.to_string(),
            country: country.to_string(),
            product: product.to_string(),
            qty,
            unit_price,
        }
    }
}

/// Typed, trimmed order that passed every silver tier predicate
///
/// Invariant: `qty > 0` and `country` is non-empty. A missing product stays
/// `None` so it reaches the silver tier as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanOrder {
    pub order_id: i64,
    pub ts: NaiveDateTime,
    pub country: String,
    pub product: Option<String>,
    pub qty: i32,
    pub unit_price: f64,
    pub revenue: f64,
}

/// File locations for the three tiers under a lakehouse root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LakehousePaths {
    pub bronze_dir: PathBuf,
    pub silver_dir: PathBuf,
    pub gold_dir: PathBuf,
    pub raw_csv: PathBuf,
    pub clean_parquet: PathBuf,
    pub aggregate_parquet: PathBuf,
}

impl LakehousePaths {
    pub fn from_root(root: &Path) -> Self {
        let bronze_dir = root.join(BRONZE_DIR_NAME);
        let silver_dir = root.join(SILVER_DIR_NAME);
        let gold_dir = root.join(GOLD_DIR_NAME);

        Self {
            raw_csv: bronze_dir.join(RAW_FILE_NAME),
            clean_parquet: silver_dir.join(CLEAN_FILE_NAME),
            aggregate_parquet: gold_dir.join(AGGREGATE_FILE_NAME),
            bronze_dir,
            silver_dir,
            gold_dir,
        }
    }

    /// Create the tier directories if they don't exist
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.bronze_dir, &self.silver_dir, &self.gold_dir] {
            std::fs::create_dir_all(dir)?;
            debug!("Tier directory ready: {}", dir.display());
        }
        Ok(())
    }
}

/// Row accounting for a single stage
#[derive(Debug, Clone, PartialEq)]
pub struct StageStats {
    pub stage: Stage,
    pub rows_in: usize,
    pub rows_out: usize,
    /// Rows dropped because a field could not be parsed
    pub rows_malformed: usize,
    pub output_path: Option<PathBuf>,
}

impl StageStats {
    pub fn new(stage: Stage, rows_in: usize, rows_out: usize) -> Self {
        Self {
            stage,
            rows_in,
            rows_out,
            rows_malformed: 0,
            output_path: None,
        }
    }

    pub fn with_output(mut self, path: &Path) -> Self {
        self.output_path = Some(path.to_path_buf());
        self
    }

    pub fn with_malformed(mut self, rows: usize) -> Self {
        self.rows_malformed = rows;
        self
    }

    /// Rows removed by filter predicates, excluding malformed ones
    pub fn rows_filtered(&self) -> usize {
        self.rows_in
            .saturating_sub(self.rows_out)
            .saturating_sub(self.rows_malformed)
    }
}

/// Processing statistics for a full run
#[derive(Debug, Default)]
pub struct PipelineStats {
    pub stages: Vec<StageStats>,
    pub processing_time_ms: u128,
}

impl PipelineStats {
    pub fn stage(&self, stage: Stage) -> Option<&StageStats> {
        self.stages.iter().find(|s| s.stage == stage)
    }
}
