use polars::prelude::{col, DataFrame, DataType, Float64Chunked, IntoLazy, IntoSeries};
use rand::Rng;
use tracing::debug;

use crate::engine::required_column;
use crate::error::StageError;

/// Drops rows with any missing value, derives `Month` from `Date`, and
/// derives `Revenue` as `Sales` times a per-row factor drawn uniformly from
/// [10, 50). The factor draw comes from the caller-supplied generator: seed
/// it for reproducible output, or seed from entropy for fresh factors on
/// every run.
pub fn execute_clean(frame: &DataFrame, rng: &mut impl Rng) -> Result<DataFrame, StageError> {
    // String-typed date columns are cast first so ISO date strings work as
    // input alongside proper Date columns.
    let date_dtype = required_column(frame, "Date")?.dtype().clone();
    let date_expr = if date_dtype == DataType::String {
        col("Date").cast(DataType::Date)
    } else {
        col("Date")
    };

    let mut cleaned = frame
        .clone()
        .lazy()
        .drop_nulls(None)
        .with_column(date_expr.dt().to_string("%Y-%m").alias("Month"))
        .collect()?;

    let sales = required_column(&cleaned, "Sales")?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let revenue: Float64Chunked = sales
        .f64()?
        .into_iter()
        .map(|value| value.map(|sales| sales * rng.gen_range(10.0..50.0)))
        .collect();
    cleaned.with_column(revenue.with_name("Revenue".into()).into_series())?;

    debug!(
        rows_in = frame.height(),
        rows_out = cleaned.height(),
        "clean: dropped null rows, derived Month and Revenue"
    );

    Ok(cleaned)
}
