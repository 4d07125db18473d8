// Fixed three-row scenario walked through every stage.

use chrono::NaiveDate;
use polars::prelude::*;

use tabrun_core::{execute_pipeline_with_options, standard_stages, RunOptions};

fn date_to_days(y: i32, m: u32, d: u32) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch");
    let date = NaiveDate::from_ymd_opt(y, m, d).expect("valid date");
    (date - epoch).num_days() as i32
}

fn scenario_input() -> DataFrame {
    let days = vec![
        date_to_days(2024, 1, 1),
        date_to_days(2024, 1, 2),
        date_to_days(2024, 1, 3),
    ];
    let date = Series::new("Date".into(), days)
        .cast(&DataType::Date)
        .expect("cast to date");
    let product = Series::new("Product".into(), &["Widget A", "Widget A", "Widget A"]);
    let sales = Series::new("Sales".into(), &[100i64, 200, 300]);
    DataFrame::new(vec![date.into(), product.into(), sales.into()]).expect("build input")
}

#[test]
fn three_widget_a_rows_flow_to_a_600_sales_summary() {
    let outputs = execute_pipeline_with_options(
        &standard_stages(),
        scenario_input(),
        &RunOptions {
            seed: Some(99),
            cancel: None,
        },
    )
    .expect("pipeline completes");

    // Clean: all three rows survive and share the January month bucket.
    let cleaned = &outputs[0];
    assert_eq!(cleaned.height(), 3);
    let months: Vec<Option<&str>> = cleaned
        .column("Month")
        .expect("Month column")
        .str()
        .expect("Month is string")
        .into_iter()
        .collect();
    assert_eq!(
        months,
        vec![Some("2024-01"), Some("2024-01"), Some("2024-01")]
    );

    // Analyze: exactly one (Month, Product) group.
    let analyzed = &outputs[1];
    assert_eq!(analyzed.height(), 1);
    let sales_sum = analyzed
        .column("Sales_sum")
        .expect("Sales_sum column")
        .as_materialized_series()
        .i64()
        .expect("Sales_sum as i64")
        .get(0)
        .expect("group present");
    assert_eq!(sales_sum, 600);
    let sales_mean = analyzed
        .column("Sales_mean")
        .expect("Sales_mean column")
        .as_materialized_series()
        .f64()
        .expect("Sales_mean as f64")
        .get(0)
        .expect("group present");
    assert_eq!(sales_mean, 200.0);

    // Summary: display-formatted metrics in their fixed order.
    let summary = &outputs[2];
    let metrics: Vec<Option<&str>> = summary
        .column("Metric")
        .expect("Metric column")
        .str()
        .expect("Metric is string")
        .into_iter()
        .collect();
    let values: Vec<Option<&str>> = summary
        .column("Value")
        .expect("Value column")
        .str()
        .expect("Value is string")
        .into_iter()
        .collect();

    assert_eq!(metrics[0], Some("Total Sales"));
    assert_eq!(values[0], Some("600"));
    assert_eq!(metrics[2], Some("Average Daily Sales"));
    assert_eq!(values[2], Some("200.0"));
    assert_eq!(metrics[3], Some("Number of Products"));
    assert_eq!(values[3], Some("1"));
    assert!(values[1].is_some_and(|value| value.starts_with('$')));
}
