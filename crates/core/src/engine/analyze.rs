use polars::prelude::{col, DataFrame, IntoLazy, SortMultipleOptions};
use tracing::debug;

use crate::error::StageError;

/// Groups the cleaned rows by (`Month`, `Product`) and computes sum and mean
/// of `Sales` and `Revenue` per group. Aggregate names flatten to
/// `<column>_<aggregate>`; group keys stay ordinary columns and the output is
/// sorted by them so row order is deterministic.
pub fn execute_analyze(frame: &DataFrame) -> Result<DataFrame, StageError> {
    let analyzed = frame
        .clone()
        .lazy()
        .group_by([col("Month"), col("Product")])
        .agg([
            col("Sales").sum().alias("Sales_sum"),
            col("Sales").mean().round(2).alias("Sales_mean"),
            col("Revenue").sum().round(2).alias("Revenue_sum"),
            col("Revenue").mean().round(2).alias("Revenue_mean"),
        ])
        .sort(["Month", "Product"], SortMultipleOptions::default())
        .collect()?;

    debug!(
        rows_in = frame.height(),
        groups = analyzed.height(),
        "analyze: aggregated sales and revenue by month and product"
    );

    Ok(analyzed)
}
