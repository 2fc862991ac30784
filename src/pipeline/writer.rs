//! Tier file reading and writing
//!
//! Raw orders land as CSV, the silver and gold tiers as Parquet. Every
//! write goes to a temporary file in the destination directory which is
//! then renamed over the target, so a failed run never leaves a torn file.

use crate::config::CompressionAlgorithm;
use crate::error::{LakehouseError, Result};
use crate::models::Stage;

use polars::prelude::{
    CsvReadOptions, CsvWriter, DataFrame, ParquetReader, ParquetWriter as PolarsParquetWriter,
    SerReader, SerWriter, StatisticsOptions,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Writer for tier files
#[derive(Debug, Clone)]
pub struct TierWriter {
    compression: CompressionAlgorithm,
}

impl TierWriter {
    pub fn new(compression: CompressionAlgorithm) -> Self {
        Self { compression }
    }

    /// Write a frame as CSV with a header row, replacing any existing file
    pub fn write_csv(&self, df: &mut DataFrame, path: &Path) -> Result<()> {
        persist_atomically(path, |file| {
            CsvWriter::new(file).include_header(true).finish(df)?;
            Ok(())
        })?;

        debug!("Wrote {} rows of CSV to {}", df.height(), path.display());
        Ok(())
    }

    /// Write a frame as Parquet, replacing any existing file
    pub fn write_parquet(&self, df: &mut DataFrame, path: &Path) -> Result<()> {
        persist_atomically(path, |file| {
            PolarsParquetWriter::new(file)
                .with_compression(self.compression.to_polars_compression())
                .with_statistics(StatisticsOptions::full())
                .finish(df)?;
            Ok(())
        })?;

        debug!(
            "Wrote {} rows of Parquet ({:?}) to {}",
            df.height(),
            self.compression,
            path.display()
        );
        Ok(())
    }
}

/// Run `write` against a temp file next to `path`, then move it into place
fn persist_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut temp = NamedTempFile::new_in(&dir)?;
    write(temp.as_file_mut())?;
    temp.as_file().sync_all()?;

    temp.persist(path)
        .map_err(|e| LakehouseError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok(())
}

/// Read the raw CSV with every column as a string
///
/// Type coercion belongs to the silver stage, so nothing is inferred here.
/// Empty fields come back as nulls.
pub fn read_raw_csv(path: &Path, stage: Stage) -> Result<DataFrame> {
    ensure_input(path, stage)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    debug!("Read {} raw rows from {}", df.height(), path.display());
    Ok(df)
}

/// Read a Parquet tier file in full
pub fn read_parquet(path: &Path, stage: Stage) -> Result<DataFrame> {
    ensure_input(path, stage)?;

    let file = File::open(path)?;
    let df = ParquetReader::new(file).finish()?;

    debug!("Read {} rows from {}", df.height(), path.display());
    Ok(df)
}

/// Fail with `SchemaMismatch` unless every expected column is present
pub fn require_columns(df: &DataFrame, path: &Path, expected: &[&str]) -> Result<()> {
    let present = df.get_column_names_str();
    let missing: Vec<String> = expected
        .iter()
        .filter(|name| !present.contains(*name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LakehouseError::SchemaMismatch {
            path: path.to_path_buf(),
            missing,
        })
    }
}

fn ensure_input(path: &Path, stage: Stage) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(LakehouseError::InputNotFound {
            stage: stage.name(),
            path: path.to_path_buf(),
        })
    }
}
