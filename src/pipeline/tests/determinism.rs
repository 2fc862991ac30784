//! Re-run behaviour: every stage replaces its output with identical content

use super::quiet_pipeline;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_rerun_produces_identical_aggregate() {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = quiet_pipeline(&temp_dir);

    pipeline.execute().unwrap();
    let first = fs::read(&pipeline.paths().aggregate_parquet).unwrap();

    pipeline.execute().unwrap();
    let second = fs::read(&pipeline.paths().aggregate_parquet).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_rerun_overwrites_instead_of_appending() {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = quiet_pipeline(&temp_dir);

    pipeline.execute().unwrap();
    let raw_first = fs::read_to_string(&pipeline.paths().raw_csv).unwrap();

    let (stats, _) = pipeline.execute().unwrap();
    let raw_second = fs::read_to_string(&pipeline.paths().raw_csv).unwrap();

    assert_eq!(raw_first, raw_second);
    assert_eq!(raw_second.lines().count(), 8);
    assert_eq!(stats.stages[1].rows_out, 4);
}

#[test]
fn test_no_temp_files_left_in_tiers() {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = quiet_pipeline(&temp_dir);
    pipeline.execute().unwrap();

    let paths = pipeline.paths();
    for dir in [&paths.bronze_dir, &paths.silver_dir, &paths.gold_dir] {
        assert_eq!(fs::read_dir(dir).unwrap().count(), 1);
    }
}
