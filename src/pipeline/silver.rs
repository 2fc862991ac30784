//! Silver tier: cleaning and type coercion
//!
//! Each raw row is parsed into typed fields, text is trimmed, a blank
//! country becomes absent and revenue is derived as `qty * unit_price`.
//! Only rows with `qty > 0`, a unit price and a country survive. Rows whose
//! fields cannot be parsed at all are handled by [`MalformedRowPolicy`].

use super::writer::{TierWriter, read_raw_csv, require_columns};
use crate::config::MalformedRowPolicy;
use crate::constants::TIMESTAMP_FORMAT;
use crate::constants::clean_columns::{COUNTRY, ORDER_ID, PRODUCT, QTY, REVENUE, TS, UNIT_PRICE};
use crate::constants::raw_columns;
use crate::error::{LakehouseError, Result};
use crate::models::{CleanOrder, Stage, StageStats};

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::{DataFrame, DataType, IntoColumn, NamedFrom, Series, StringChunked, TimeUnit};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Timestamp layouts accepted in the raw tier, tried in order
const ACCEPTED_TIMESTAMP_FORMATS: &[&str] = &[
    TIMESTAMP_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// String fields of one raw row; `None` means the field was empty
#[derive(Debug, Clone, Copy, Default)]
pub struct RawFields<'a> {
    pub order_id: Option<&'a str>,
    pub ts: Option<&'a str>,
    pub country: Option<&'a str>,
    pub product: Option<&'a str>,
    pub qty: Option<&'a str>,
    pub unit_price: Option<&'a str>,
}

/// Trim and drop empty text
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn malformed(
    row: usize,
    column: &'static str,
    value: &str,
    reason: impl ToString,
) -> LakehouseError {
    LakehouseError::MalformedRow {
        row,
        column,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn parse_order_id(row: usize, value: Option<&str>) -> Result<i64> {
    let raw =
        non_blank(value).ok_or_else(|| malformed(row, ORDER_ID, "", "order id is missing"))?;
    raw.parse::<i64>()
        .map_err(|e| malformed(row, ORDER_ID, raw, e))
}

pub fn parse_timestamp(row: usize, value: Option<&str>) -> Result<NaiveDateTime> {
    let raw = non_blank(value).ok_or_else(|| malformed(row, TS, "", "timestamp is missing"))?;

    for format in ACCEPTED_TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(ts);
        }
    }

    // Bare dates are midnight
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| malformed(row, TS, raw, "not a recognised date-time"))
}

/// Absent quantities parse to `None` and are filtered, not rejected
pub fn parse_qty(row: usize, value: Option<&str>) -> Result<Option<i32>> {
    non_blank(value)
        .map(|raw| raw.parse::<i32>().map_err(|e| malformed(row, QTY, raw, e)))
        .transpose()
}

/// Absent prices parse to `None` and are filtered, not rejected
pub fn parse_unit_price(row: usize, value: Option<&str>) -> Result<Option<f64>> {
    let Some(raw) = non_blank(value) else {
        return Ok(None);
    };

    let price = raw
        .parse::<f64>()
        .map_err(|e| malformed(row, UNIT_PRICE, raw, e))?;

    if price.is_finite() {
        Ok(Some(price))
    } else {
        Err(malformed(row, UNIT_PRICE, raw, "price is not finite"))
    }
}

/// Clean one raw row
///
/// Returns `Ok(None)` when the row parses but fails a silver predicate, and
/// `Err(MalformedRow)` when a field cannot be parsed.
pub fn clean_row(row: usize, fields: RawFields<'_>) -> Result<Option<CleanOrder>> {
    let order_id = parse_order_id(row, fields.order_id)?;
    let ts = parse_timestamp(row, fields.ts)?;
    let qty = parse_qty(row, fields.qty)?;
    let unit_price = parse_unit_price(row, fields.unit_price)?;
    let country = non_blank(fields.country);
    let product = fields.product.map(str::trim);

    let (Some(qty), Some(unit_price), Some(country)) = (qty, unit_price, country) else {
        return Ok(None);
    };
    if qty <= 0 {
        return Ok(None);
    }

    Ok(Some(CleanOrder {
        order_id,
        ts,
        country: country.to_string(),
        product: product.map(str::to_string),
        qty,
        unit_price,
        revenue: f64::from(qty) * unit_price,
    }))
}

/// Outcome of cleaning a raw frame
#[derive(Debug, Clone, Default)]
pub struct CleanedOrders {
    pub orders: Vec<CleanOrder>,
    pub rows_in: usize,
    pub rows_malformed: usize,
}

fn string_column<'a>(raw: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    Ok(raw.column(name)?.as_materialized_series().str()?)
}

/// Apply silver rules to every row of a raw, all-string frame
pub fn clean_orders(raw: &DataFrame, policy: MalformedRowPolicy) -> Result<CleanedOrders> {
    let order_ids = string_column(raw, raw_columns::ORDER_ID)?;
    let timestamps = string_column(raw, raw_columns::TS)?;
    let countries = string_column(raw, raw_columns::COUNTRY)?;
    let products = string_column(raw, raw_columns::PRODUCT)?;
    let quantities = string_column(raw, raw_columns::QTY)?;
    let unit_prices = string_column(raw, raw_columns::UNIT_PRICE)?;

    let mut cleaned = CleanedOrders {
        rows_in: raw.height(),
        ..Default::default()
    };

    for row in 0..raw.height() {
        let fields = RawFields {
            order_id: order_ids.get(row),
            ts: timestamps.get(row),
            country: countries.get(row),
            product: products.get(row),
            qty: quantities.get(row),
            unit_price: unit_prices.get(row),
        };

        // Rows are reported 1-based, counting the header as row 0
        match clean_row(row + 1, fields) {
            Ok(Some(order)) => cleaned.orders.push(order),
            Ok(None) => debug!("Silver: dropped raw row {} ({:?})", row + 1, fields),
            Err(e) => match policy {
                MalformedRowPolicy::Reject => {
                    warn!("Silver: rejected {}", e);
                    cleaned.rows_malformed += 1;
                }
                MalformedRowPolicy::Abort => return Err(e),
            },
        }
    }

    Ok(cleaned)
}

/// Build the silver frame, columns in tier order
pub fn clean_frame(orders: &[CleanOrder]) -> Result<DataFrame> {
    let order_ids: Vec<i64> = orders.iter().map(|o| o.order_id).collect();
    let ts_micros: Vec<i64> = orders
        .iter()
        .map(|o| o.ts.and_utc().timestamp_micros())
        .collect();
    let countries: Vec<&str> = orders.iter().map(|o| o.country.as_str()).collect();
    let products: Vec<Option<&str>> = orders.iter().map(|o| o.product.as_deref()).collect();
    let quantities: Vec<i32> = orders.iter().map(|o| o.qty).collect();
    let unit_prices: Vec<f64> = orders.iter().map(|o| o.unit_price).collect();
    let revenues: Vec<f64> = orders.iter().map(|o| o.revenue).collect();

    let timestamps = Series::new(TS.into(), ts_micros)
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;

    let df = DataFrame::new(vec![
        Series::new(ORDER_ID.into(), order_ids).into_column(),
        timestamps.into_column(),
        Series::new(COUNTRY.into(), countries).into_column(),
        Series::new(PRODUCT.into(), products).into_column(),
        Series::new(QTY.into(), quantities).into_column(),
        Series::new(UNIT_PRICE.into(), unit_prices).into_column(),
        Series::new(REVENUE.into(), revenues).into_column(),
    ])?;

    Ok(df)
}

/// Cleaning stage: bronze CSV in, silver Parquet out
#[derive(Debug)]
pub struct SilverCleaner {
    input_path: PathBuf,
    output_path: PathBuf,
    policy: MalformedRowPolicy,
    writer: TierWriter,
}

impl SilverCleaner {
    pub fn new(
        input_path: PathBuf,
        output_path: PathBuf,
        policy: MalformedRowPolicy,
        writer: TierWriter,
    ) -> Self {
        Self {
            input_path,
            output_path,
            policy,
            writer,
        }
    }

    pub fn clean(&self) -> Result<StageStats> {
        let raw = read_raw_csv(&self.input_path, Stage::Silver)?;
        require_columns(&raw, &self.input_path, raw_columns::ALL)?;

        let cleaned = clean_orders(&raw, self.policy)?;
        let mut df = clean_frame(&cleaned.orders)?;
        self.writer.write_parquet(&mut df, &self.output_path)?;

        let stats = StageStats::new(Stage::Silver, cleaned.rows_in, cleaned.orders.len())
            .with_malformed(cleaned.rows_malformed)
            .with_output(&self.output_path);

        info!(
            "Silver: kept {} of {} rows ({} filtered, {} malformed) -> {}",
            stats.rows_out,
            stats.rows_in,
            stats.rows_filtered(),
            stats.rows_malformed,
            self.output_path.display()
        );

        Ok(stats)
    }
}
