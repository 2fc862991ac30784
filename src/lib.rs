//! Lakehouse Pipeline Library
//!
//! A small bronze/silver/gold lakehouse built on Polars:
//! - Bronze: a fixed set of raw orders landed as CSV, invalid rows included
//! - Silver: typed, trimmed and filtered orders with derived revenue, as Parquet
//! - Gold: revenue per day and country, as Parquet
//! - Reports: daily revenue, products ranked by revenue and a KPI summary
//!
//! Stages run strictly in sequence and fail fast. Every run fully replaces
//! the previous run's files.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod pipeline;

// Re-export commonly used types
pub use config::{CompressionAlgorithm, LakehouseConfig, MalformedRowPolicy};
pub use error::{LakehouseError, Result};
pub use models::{CleanOrder, LakehousePaths, PipelineStats, RawOrder, Stage, StageStats};
pub use pipeline::LakehousePipeline;
pub use pipeline::report::Report;
