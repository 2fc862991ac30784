//! Application constants for the lakehouse pipeline
//!
//! Tier layout, file names, column names and formats shared by every stage.

// =============================================================================
// Tier Layout
// =============================================================================

/// Default lakehouse root, relative to the working directory
pub const DEFAULT_ROOT: &str = "lakehouse";

pub const BRONZE_DIR_NAME: &str = "bronze";
pub const SILVER_DIR_NAME: &str = "silver";
pub const GOLD_DIR_NAME: &str = "gold";

pub const RAW_FILE_NAME: &str = "orders_raw.csv";
pub const CLEAN_FILE_NAME: &str = "orders_clean.parquet";
pub const AGGREGATE_FILE_NAME: &str = "daily_revenue.parquet";

// =============================================================================
// Formats
// =============================================================================

/// Timestamp layout used in the raw tier
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Decimal places kept for monetary aggregates
pub const DEFAULT_MONEY_DECIMALS: u32 = 2;

// =============================================================================
// Column Names
// =============================================================================

/// Raw tier columns, in file order
pub mod raw_columns {
    pub const ORDER_ID: &str = "order_id";
    pub const TS: &str = "ts";
    pub const COUNTRY: &str = "country";
    pub const PRODUCT: &str = "product";
    pub const QTY: &str = "qty";
    pub const UNIT_PRICE: &str = "unit_price";

    pub const ALL: &[&str] = &[ORDER_ID, TS, COUNTRY, PRODUCT, QTY, UNIT_PRICE];
}

/// Clean tier columns: the raw set plus the derived revenue
pub mod clean_columns {
    pub use super::raw_columns::{COUNTRY, ORDER_ID, PRODUCT, QTY, TS, UNIT_PRICE};

    pub const REVENUE: &str = "revenue";

    pub const ALL: &[&str] = &[ORDER_ID, TS, COUNTRY, PRODUCT, QTY, UNIT_PRICE, REVENUE];
}

/// Aggregate tier columns
pub mod aggregate_columns {
    pub const DAY: &str = "day";
    pub const COUNTRY: &str = "country";
    pub const ORDER_COUNT: &str = "order_count";
    pub const UNITS_SOLD: &str = "units_sold";
    pub const TOTAL_REVENUE: &str = "total_revenue";

    pub const ALL: &[&str] = &[DAY, COUNTRY, ORDER_COUNT, UNITS_SOLD, TOTAL_REVENUE];
}

/// Report output columns
pub mod report_columns {
    pub const UNITS: &str = "units";
    pub const REVENUE: &str = "revenue";
    pub const TOTAL_REVENUE: &str = "total_revenue";
    pub const CLEAN_ORDERS: &str = "clean_orders";
    pub const AVG_ORDER_VALUE: &str = "avg_order_value";
}
