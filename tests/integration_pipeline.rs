//! Integration tests for the public pipeline API
//!
//! Drives the library the way the binary does, against a temp lakehouse root.

use lakehouse_pipeline::pipeline::bronze::BronzeGenerator;
use lakehouse_pipeline::pipeline::writer::{TierWriter, read_parquet};
use lakehouse_pipeline::{
    CompressionAlgorithm, LakehouseConfig, LakehouseError, LakehousePipeline, RawOrder, Stage,
};
use tempfile::TempDir;

fn config_for(temp_dir: &TempDir) -> LakehouseConfig {
    LakehouseConfig::default()
        .with_root(temp_dir.path().join("lakehouse"))
        .with_quiet()
}

#[test]
fn test_end_to_end_with_default_layout() {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = LakehousePipeline::new(config_for(&temp_dir)).unwrap();

    let (stats, report) = pipeline.execute().unwrap();

    let root = temp_dir.path().join("lakehouse");
    assert!(root.join("bronze/orders_raw.csv").is_file());
    assert!(root.join("silver/orders_clean.parquet").is_file());
    assert!(root.join("gold/daily_revenue.parquet").is_file());

    assert_eq!(stats.stage(Stage::Silver).unwrap().rows_out, 4);
    assert_eq!(stats.stage(Stage::Gold).unwrap().rows_out, 3);
    assert_eq!(report.kpi.height(), 1);
    assert_eq!(report.top_products.height(), 3);
}

#[test]
fn test_custom_orders_flow_through_every_stage() {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = LakehousePipeline::new(config_for(&temp_dir)).unwrap();
    pipeline.paths().ensure_dirs().unwrap();

    let orders = vec![
        RawOrder::new(10, "2026-03-01 09:00:00", " DE ", "Dock", 2, Some(150.25)),
        RawOrder::new(11, "2026-03-01 21:30:00", "DE", "Dock", 1, Some(150.25)),
        RawOrder::new(12, "2026-03-02 08:15:00", "FR", "Cable", 0, Some(9.99)),
        RawOrder::new(13, "2026-03-02 08:20:00", "FR", "Cable", 5, Some(9.99)),
    ];

    let generator = BronzeGenerator::new(
        pipeline.paths().raw_csv.clone(),
        TierWriter::new(CompressionAlgorithm::Snappy),
    );
    generator.write_orders(&orders).unwrap();

    let silver = pipeline.silver().clean().unwrap();
    assert_eq!(silver.rows_in, 4);
    assert_eq!(silver.rows_out, 3);

    pipeline.gold().aggregate().unwrap();
    let gold = read_parquet(&pipeline.paths().aggregate_parquet, Stage::Report).unwrap();
    assert_eq!(gold.height(), 2);

    let totals: Vec<Option<f64>> = gold
        .column("total_revenue")
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(totals, vec![Some(450.75), Some(49.95)]);

    let report = pipeline.reporter().build().unwrap();
    assert_eq!(report.top_products.height(), 2);
}

#[test]
fn test_reporting_alone_fails_fast() {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = LakehousePipeline::new(config_for(&temp_dir)).unwrap();

    let error = pipeline.reporter().build().unwrap_err();
    assert!(matches!(error, LakehouseError::InputNotFound { .. }));
    assert!(error.to_string().contains("daily_revenue.parquet"));
}
