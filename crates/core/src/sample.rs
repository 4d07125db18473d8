use chrono::NaiveDate;
use polars::prelude::{DataFrame, DataType, NamedFrom, PolarsError, PolarsResult, Series};
use rand::Rng;

/// Row count of the reference sample dataset.
pub const SAMPLE_ROWS: usize = 100;

const PRODUCTS: [&str; 3] = ["Widget A", "Widget B", "Widget C"];
const REGIONS: [&str; 4] = ["North", "South", "East", "West"];

/// Randomized daily sales fixture: `Date` starting at 2024-01-01, `Product`
/// and `Region` drawn from fixed categories, `Sales` uniform in 100..=999.
/// This is the default input for the CLI driver and tests, not core logic.
pub fn generate_sample_data(rows: usize, rng: &mut impl Rng) -> PolarsResult<DataFrame> {
    let start = days_since_epoch(2024, 1, 1)?;
    let days: Vec<i32> = (0..rows as i32).map(|offset| start + offset).collect();
    let products: Vec<&str> = (0..rows)
        .map(|_| PRODUCTS[rng.gen_range(0..PRODUCTS.len())])
        .collect();
    let sales: Vec<i64> = (0..rows).map(|_| rng.gen_range(100..1000)).collect();
    let regions: Vec<&str> = (0..rows)
        .map(|_| REGIONS[rng.gen_range(0..REGIONS.len())])
        .collect();

    let date = Series::new("Date".into(), days).cast(&DataType::Date)?;
    DataFrame::new(vec![
        date.into(),
        Series::new("Product".into(), products).into(),
        Series::new("Sales".into(), sales).into(),
        Series::new("Region".into(), regions).into(),
    ])
}

fn days_since_epoch(year: i32, month: u32, day: u32) -> PolarsResult<i32> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
        .ok_or_else(|| PolarsError::ComputeError("failed to construct epoch date".into()))?;
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        PolarsError::ComputeError(
            format!("invalid date: {year}-{month:02}-{day:02}").into(),
        )
    })?;
    Ok((date - epoch).num_days() as i32)
}
