//! Integration tests for the pipeline module
//!
//! Runs the stages against temporary lakehouse roots.

pub mod determinism;

use crate::config::LakehouseConfig;
use crate::constants::clean_columns::{COUNTRY, ORDER_ID, PRODUCT, QTY, REVENUE, TS, UNIT_PRICE};
use crate::models::CleanOrder;
use crate::pipeline::LakehousePipeline;
use chrono::DateTime;
use polars::prelude::{DataFrame, DataType};
use tempfile::TempDir;

/// Pipeline rooted in a fresh temp directory, with console banners off
pub fn quiet_pipeline(temp_dir: &TempDir) -> LakehousePipeline {
    let config = LakehouseConfig::default()
        .with_root(temp_dir.path().join("lakehouse"))
        .with_quiet();
    LakehousePipeline::new(config).unwrap()
}

pub fn i64_values(df: &DataFrame, name: &str) -> Vec<Option<i64>> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .i64()
        .unwrap()
        .into_iter()
        .collect()
}

pub fn f64_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

pub fn str_values(df: &DataFrame, name: &str) -> Vec<String> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .cast(&DataType::String)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect()
}

/// Read a silver frame back into typed orders
pub fn orders_from_frame(df: &DataFrame) -> Vec<CleanOrder> {
    let column = |name: &str| df.column(name).unwrap().as_materialized_series();
    let ts_micros = column(TS).cast(&DataType::Int64).unwrap();

    let order_ids = column(ORDER_ID).i64().unwrap();
    let ts_micros = ts_micros.i64().unwrap();
    let countries = column(COUNTRY).str().unwrap();
    let products = column(PRODUCT).str().unwrap();
    let quantities = column(QTY).i32().unwrap();
    let unit_prices = column(UNIT_PRICE).f64().unwrap();
    let revenues = column(REVENUE).f64().unwrap();

    (0..df.height())
        .map(|row| CleanOrder {
            order_id: order_ids.get(row).unwrap(),
            ts: DateTime::from_timestamp_micros(ts_micros.get(row).unwrap())
                .unwrap()
                .naive_utc(),
            country: countries.get(row).unwrap().to_string(),
            product: products.get(row).map(str::to_string),
            qty: quantities.get(row).unwrap(),
            unit_price: unit_prices.get(row).unwrap(),
            revenue: revenues.get(row).unwrap(),
        })
        .collect()
}
