//! Monetary rounding
//!
//! Revenue figures are rounded half away from zero, so 0.125 becomes 0.13
//! and -0.125 becomes -0.13. Rounding stays inside the lazy query.

use polars::prelude::{DataType, Expr, NULL, RoundMode, len, lit, when};

/// Round a money expression to `decimals` places, halves away from zero
pub fn round_money(expr: Expr, decimals: u32) -> Expr {
    expr.round(decimals, RoundMode::HalfAwayFromZero)
}

/// Rounded money aggregate that is null over an empty frame
///
/// `sum` over zero rows yields 0.0; a total of nothing is unknown, not zero.
pub fn rounded_or_null(aggregate: Expr, decimals: u32) -> Expr {
    when(len().eq(lit(0)))
        .then(lit(NULL).cast(DataType::Float64))
        .otherwise(round_money(aggregate, decimals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn rounded(values: &[f64], decimals: u32) -> Vec<Option<f64>> {
        let df = df!("revenue" => values).unwrap();
        df.lazy()
            .select([round_money(col("revenue"), decimals)])
            .collect()
            .unwrap()
            .column("revenue")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(
            rounded(&[1900.0, 2.675_000_1, 1234.5678], 2),
            vec![Some(1900.0), Some(2.68), Some(1234.57)]
        );
        assert_eq!(rounded(&[0.5, -0.5, 2.5], 0), vec![Some(1.0), Some(-1.0), Some(3.0)]);
    }

    #[test]
    fn test_round_money_keeps_nulls() {
        let df = df!("revenue" => [Some(4500.004), None]).unwrap();
        let out = df
            .lazy()
            .select([round_money(col("revenue"), 2)])
            .collect()
            .unwrap();

        let revenue = out.column("revenue").unwrap().as_materialized_series().f64().unwrap();
        assert_eq!(revenue.get(0), Some(4500.0));
        assert_eq!(revenue.get(1), None);
    }

    #[test]
    fn test_rounded_or_null() {
        let df = df!("revenue" => [0.104, 0.0271]).unwrap();
        let total = |df: DataFrame| {
            df.lazy()
                .select([rounded_or_null(col("revenue").sum(), 2).alias("total")])
                .collect()
                .unwrap()
                .column("total")
                .unwrap()
                .as_materialized_series()
                .f64()
                .unwrap()
                .get(0)
        };

        assert_eq!(total(df.clone()), Some(0.13));
        assert_eq!(total(df.head(Some(0))), None);
    }
}
