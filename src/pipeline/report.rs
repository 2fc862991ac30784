//! Read-only reports over the silver and gold tiers
//!
//! Three views: the gold daily revenue table as stored, products ranked by
//! revenue, and a single-row KPI summary. Nothing here writes to disk.

use super::money::{round_money, rounded_or_null};
use super::writer::{read_parquet, require_columns};
use crate::constants::report_columns::{
    AVG_ORDER_VALUE, CLEAN_ORDERS, REVENUE, TOTAL_REVENUE, UNITS,
};
use crate::constants::{aggregate_columns, clean_columns};
use crate::error::Result;
use crate::models::Stage;

use colored::*;
use polars::prelude::{DataFrame, DataType, IntoLazy, SortMultipleOptions, col, len};
use std::path::PathBuf;
use tracing::debug;

/// Products ranked by rounded revenue, highest first, ties by name
pub fn top_products(clean: DataFrame, decimals: u32) -> Result<DataFrame> {
    let df = clean
        .lazy()
        .group_by([col(clean_columns::PRODUCT)])
        .agg([
            col(clean_columns::QTY)
                .cast(DataType::Int64)
                .sum()
                .alias(UNITS),
            round_money(col(clean_columns::REVENUE).sum(), decimals)
                .alias(REVENUE),
        ])
        .sort_by_exprs(
            [col(REVENUE), col(clean_columns::PRODUCT)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()?;

    Ok(df)
}

/// Total revenue, order count and average revenue per order
///
/// Over an empty silver tier the count is 0 and both money figures are null.
pub fn kpi(clean: DataFrame, decimals: u32) -> Result<DataFrame> {
    let df = clean
        .lazy()
        .select([
            rounded_or_null(col(clean_columns::REVENUE).sum(), decimals)
                .alias(TOTAL_REVENUE),
            len().cast(DataType::Int64).alias(CLEAN_ORDERS),
            rounded_or_null(col(clean_columns::REVENUE).mean(), decimals)
                .alias(AVG_ORDER_VALUE),
        ])
        .collect()?;

    Ok(df)
}

/// The three report views
#[derive(Debug, Clone)]
pub struct Report {
    pub daily_revenue: DataFrame,
    pub top_products: DataFrame,
    pub kpi: DataFrame,
}

impl Report {
    /// Print every view to stdout
    pub fn print(&self) {
        println!("\n{}", "=== GOLD: Daily Revenue ===".bright_green().bold());
        println!("{}", self.daily_revenue);

        println!("\n{}", "=== SILVER: Top Products ===".bright_green().bold());
        println!("{}", self.top_products);

        println!("\n{}", "=== KPI ===".bright_green().bold());
        println!("{}", self.kpi);
    }
}

/// Reporting stage over existing tier files
#[derive(Debug)]
pub struct Reporter {
    clean_path: PathBuf,
    aggregate_path: PathBuf,
    money_decimals: u32,
}

impl Reporter {
    pub fn new(clean_path: PathBuf, aggregate_path: PathBuf, money_decimals: u32) -> Self {
        Self {
            clean_path,
            aggregate_path,
            money_decimals,
        }
    }

    /// Compute all views; fails with `InputNotFound` if a tier is missing
    pub fn build(&self) -> Result<Report> {
        let daily_revenue = read_parquet(&self.aggregate_path, Stage::Report)?;
        require_columns(&daily_revenue, &self.aggregate_path, aggregate_columns::ALL)?;

        let clean = read_parquet(&self.clean_path, Stage::Report)?;
        require_columns(&clean, &self.clean_path, clean_columns::ALL)?;

        let report = Report {
            daily_revenue,
            top_products: top_products(clean.clone(), self.money_decimals)?,
            kpi: kpi(clean, self.money_decimals)?,
        };

        debug!(
            "Report: {} daily rows, {} products",
            report.daily_revenue.height(),
            report.top_products.height()
        );

        Ok(report)
    }
}
