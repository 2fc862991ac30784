//! Gold tier: daily revenue aggregation
//!
//! Groups silver orders by calendar day and country and summarizes them.
//! One output row per (day, country) pair, sorted by day then country.

use super::money::round_money;
use super::writer::{TierWriter, read_parquet, require_columns};
use crate::constants::aggregate_columns::{COUNTRY, DAY, ORDER_COUNT, TOTAL_REVENUE, UNITS_SOLD};
use crate::constants::clean_columns;
use crate::error::Result;
use crate::models::{Stage, StageStats};

use polars::prelude::{DataFrame, DataType, IntoLazy, SortMultipleOptions, col, len};
use std::path::PathBuf;
use tracing::info;

/// Summarize silver orders into one row per (day, country)
pub fn daily_revenue(clean: DataFrame, decimals: u32) -> Result<DataFrame> {
    let df = clean
        .lazy()
        .group_by([
            col(clean_columns::TS).dt().date().alias(DAY),
            col(clean_columns::COUNTRY),
        ])
        .agg([
            len().cast(DataType::Int64).alias(ORDER_COUNT),
            col(clean_columns::QTY)
                .cast(DataType::Int64)
                .sum()
                .alias(UNITS_SOLD),
            round_money(col(clean_columns::REVENUE).sum(), decimals)
                .alias(TOTAL_REVENUE),
        ])
        .sort_by_exprs([col(DAY), col(COUNTRY)], SortMultipleOptions::default())
        .collect()?;

    Ok(df)
}

/// Aggregation stage: silver Parquet in, gold Parquet out
#[derive(Debug)]
pub struct GoldAggregator {
    input_path: PathBuf,
    output_path: PathBuf,
    money_decimals: u32,
    writer: TierWriter,
}

impl GoldAggregator {
    pub fn new(
        input_path: PathBuf,
        output_path: PathBuf,
        money_decimals: u32,
        writer: TierWriter,
    ) -> Self {
        Self {
            input_path,
            output_path,
            money_decimals,
            writer,
        }
    }

    pub fn aggregate(&self) -> Result<StageStats> {
        let clean = read_parquet(&self.input_path, Stage::Gold)?;
        require_columns(&clean, &self.input_path, clean_columns::ALL)?;

        let rows_in = clean.height();
        let mut df = daily_revenue(clean, self.money_decimals)?;
        self.writer.write_parquet(&mut df, &self.output_path)?;

        info!(
            "Gold: {} silver rows summarized into {} daily rows -> {}",
            rows_in,
            df.height(),
            self.output_path.display()
        );

        Ok(StageStats::new(Stage::Gold, rows_in, df.height()).with_output(&self.output_path))
    }
}
