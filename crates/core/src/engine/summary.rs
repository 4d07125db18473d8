use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::debug;

use crate::engine::required_column;
use crate::error::StageError;

const METRICS: [&str; 4] = [
    "Total Sales",
    "Total Revenue",
    "Average Daily Sales",
    "Number of Products",
];

/// Reduces the analysis frame to four display-formatted executive metrics,
/// emitted as a `Metric`/`Value` frame in a fixed order.
pub fn execute_summary(frame: &DataFrame) -> Result<DataFrame, StageError> {
    if frame.height() == 0 {
        return Err(StageError::EmptyInput {
            message: "analysis dataset has no rows to summarize".to_string(),
        });
    }

    let total_sales = required_column(frame, "Sales_sum")?
        .as_materialized_series()
        .sum::<i64>()?;
    let total_revenue = required_column(frame, "Revenue_sum")?
        .as_materialized_series()
        .sum::<f64>()?;
    let avg_sales = required_column(frame, "Sales_mean")?
        .as_materialized_series()
        .mean()
        .ok_or_else(|| StageError::EmptyInput {
            message: "Sales_mean has no values to average".to_string(),
        })?;
    let product_count = required_column(frame, "Product")?
        .as_materialized_series()
        .n_unique()?;

    debug!(
        total_sales,
        product_count, "summary: computed executive metrics"
    );

    let values = vec![
        format_integer(total_sales),
        format_currency(total_revenue),
        format!("{avg_sales:.1}"),
        product_count.to_string(),
    ];

    let metric = Series::new("Metric".into(), METRICS.as_slice());
    let value = Series::new("Value".into(), values);
    Ok(DataFrame::new(vec![metric.into(), value.into()])?)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Thousands-separated integer, e.g. `1234567` -> `"1,234,567"`.
fn format_integer(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let grouped = group_thousands(&digits);
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Currency with thousands separators and two decimals, e.g. `"$1,234.50"`.
fn format_currency(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (digits, fraction) = match formatted.split_once('.') {
        Some(parts) => parts,
        None => (formatted.as_str(), "00"),
    };
    let sign = if value < 0.0 { "-" } else { "" };
    format!("${sign}{}.{fraction}", group_thousands(digits))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis_frame() -> DataFrame {
        let month = Series::new("Month".into(), &["2024-01", "2024-01", "2024-02"]);
        let product = Series::new("Product".into(), &["Widget A", "Widget B", "Widget A"]);
        let sales_sum = Series::new("Sales_sum".into(), &[600i64, 400, 1000]);
        let sales_mean = Series::new("Sales_mean".into(), &[200.0f64, 400.0, 500.0]);
        let revenue_sum = Series::new("Revenue_sum".into(), &[6000.0f64, 4000.5, 10000.0]);
        let revenue_mean = Series::new("Revenue_mean".into(), &[2000.0f64, 4000.5, 5000.0]);
        DataFrame::new(vec![
            month.into(),
            product.into(),
            sales_sum.into(),
            sales_mean.into(),
            revenue_sum.into(),
            revenue_mean.into(),
        ])
        .expect("build analysis frame")
    }

    fn values(frame: &DataFrame) -> Vec<String> {
        frame
            .column("Value")
            .expect("Value column")
            .str()
            .expect("Value is string")
            .into_iter()
            .map(|value| value.expect("no null values").to_string())
            .collect()
    }

    #[test]
    fn emits_four_metrics_in_fixed_order() {
        let summary = execute_summary(&analysis_frame()).expect("summary succeeds");
        assert_eq!(summary.height(), 4);

        let metrics: Vec<Option<&str>> = summary
            .column("Metric")
            .expect("Metric column")
            .str()
            .expect("Metric is string")
            .into_iter()
            .collect();
        assert_eq!(
            metrics,
            vec![
                Some("Total Sales"),
                Some("Total Revenue"),
                Some("Average Daily Sales"),
                Some("Number of Products"),
            ]
        );
    }

    #[test]
    fn metric_values_use_their_display_formats() {
        let summary = execute_summary(&analysis_frame()).expect("summary succeeds");
        let values = values(&summary);
        assert_eq!(values[0], "2,000");
        assert_eq!(values[1], "$20,000.50");
        // mean of [200.0, 400.0, 500.0]
        assert_eq!(values[2], "366.7");
        assert_eq!(values[3], "2");
    }

    #[test]
    fn empty_analysis_frame_is_a_stage_failure() {
        let summary = execute_summary(&analysis_frame().head(Some(0)));
        assert!(matches!(summary, Err(StageError::EmptyInput { .. })));
    }

    #[test]
    fn integer_grouping_handles_boundaries() {
        assert_eq!(format_integer(0), "0");
        assert_eq!(format_integer(999), "999");
        assert_eq!(format_integer(1000), "1,000");
        assert_eq!(format_integer(1234567), "1,234,567");
        assert_eq!(format_integer(-1234), "-1,234");
    }

    #[test]
    fn currency_grouping_keeps_two_decimals() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.994), "$999.99");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
    }
}
