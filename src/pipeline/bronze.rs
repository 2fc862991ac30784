//! Bronze tier: raw order generation
//!
//! Materializes the fixed demo order set and lands it as CSV. Some rows
//! are deliberately invalid so the silver stage has something to reject.

use super::writer::TierWriter;
use crate::constants::raw_columns::{COUNTRY, ORDER_ID, PRODUCT, QTY, TS, UNIT_PRICE};
use crate::error::Result;
use crate::models::{RawOrder, Stage, StageStats};

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use std::path::PathBuf;
use tracing::info;

/// The demo order set
///
/// Orders 3 (blank country), 4 (negative quantity) and 5 (missing unit
/// price) are invalid on purpose.
pub fn sample_orders() -> Vec<RawOrder> {
    vec![
        RawOrder::new(1, "2026-01-01 10:03:00", "TR", "Keyboard", 1, Some(1200.0)),
        RawOrder::new(2, "2026-01-01 11:10:00", "TR", "Mouse", 2, Some(350.0)),
        RawOrder::new(3, "2026-01-01 12:45:00", "", "Monitor", 1, Some(4200.0)),
        RawOrder::new(4, "2026-01-02 09:15:00", "DE", "Monitor", -1, Some(4200.0)),
        RawOrder::new(5, "2026-01-02 14:22:00", "TR", "Laptop", 1, None),
        RawOrder::new(6, "2026-01-03 08:01:00", "US", "Keyboard", 3, Some(1100.0)),
        RawOrder::new(7, "2026-01-03 17:40:00", "TR", "Monitor", 1, Some(4000.0)),
    ]
}

/// Build the raw tier frame, columns in file order
pub fn raw_frame(orders: &[RawOrder]) -> Result<DataFrame> {
    let order_ids: Vec<i64> = orders.iter().map(|o| o.order_id).collect();
    let timestamps: Vec<&str> = orders.iter().map(|o| o.ts.as_str()).collect();
    let countries: Vec<&str> = orders.iter().map(|o| o.country.as_str()).collect();
    let products: Vec<&str> = orders.iter().map(|o| o.product.as_str()).collect();
    let quantities: Vec<i32> = orders.iter().map(|o| o.qty).collect();
    let unit_prices: Vec<Option<f64>> = orders.iter().map(|o| o.unit_price).collect();

    let df = DataFrame::new(vec![
        Series::new(ORDER_ID.into(), order_ids).into_column(),
        Series::new(TS.into(), timestamps).into_column(),
        Series::new(COUNTRY.into(), countries).into_column(),
        Series::new(PRODUCT.into(), products).into_column(),
        Series::new(QTY.into(), quantities).into_column(),
        Series::new(UNIT_PRICE.into(), unit_prices).into_column(),
    ])?;

    Ok(df)
}

/// Source generator for the bronze tier
#[derive(Debug)]
pub struct BronzeGenerator {
    output_path: PathBuf,
    writer: TierWriter,
}

impl BronzeGenerator {
    pub fn new(output_path: PathBuf, writer: TierWriter) -> Self {
        Self {
            output_path,
            writer,
        }
    }

    /// Write the demo orders, overwriting the previous run's file
    pub fn generate(&self) -> Result<StageStats> {
        self.write_orders(&sample_orders())
    }

    /// Write an arbitrary raw order set
    pub fn write_orders(&self, orders: &[RawOrder]) -> Result<StageStats> {
        let mut df = raw_frame(orders)?;
        self.writer.write_csv(&mut df, &self.output_path)?;

        info!(
            "Bronze: wrote {} raw orders to {}",
            orders.len(),
            self.output_path.display()
        );

        Ok(StageStats::new(Stage::Bronze, orders.len(), orders.len())
            .with_output(&self.output_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompressionAlgorithm;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_sample_orders_shape() {
        let orders = sample_orders();

        assert_eq!(orders.len(), 7);
        let ids: Vec<i64> = orders.iter().map(|o| o.order_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);

        assert_eq!(orders[2].country, "");
        assert_eq!(orders[3].qty, -1);
        assert_eq!(orders[4].unit_price, None);
    }

    #[test]
    fn test_raw_frame_column_order() {
        let df = raw_frame(&sample_orders()).unwrap();

        assert_eq!(df.height(), 7);
        assert_eq!(
            df.get_column_names_str(),
            vec!["order_id", "ts", "country", "product", "qty", "unit_price"]
        );
    }

    #[test]
    fn test_generate_writes_csv_with_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("orders_raw.csv");
        let generator =
            BronzeGenerator::new(path.clone(), TierWriter::new(CompressionAlgorithm::Snappy));

        let stats = generator.generate().unwrap();
        assert_eq!(stats.stage, Stage::Bronze);
        assert_eq!(stats.rows_out, 7);
        assert_eq!(stats.output_path, Some(path.clone()));

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("order_id,ts,country,product,qty,unit_price")
        );
        assert_eq!(lines.count(), 7);
    }

    #[test]
    fn test_generate_overwrites_previous_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("orders_raw.csv");
        fs::write(&path, "stale content that is much longer than a header\n".repeat(50)).unwrap();

        let generator =
            BronzeGenerator::new(path.clone(), TierWriter::new(CompressionAlgorithm::Snappy));
        generator.generate().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        assert!(content.starts_with("order_id,"));
    }
}
