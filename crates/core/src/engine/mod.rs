pub mod analyze;
pub mod clean;
pub mod summary;

pub use analyze::execute_analyze;
pub use clean::execute_clean;
pub use summary::execute_summary;

use polars::prelude::{Column, DataFrame};

use crate::error::StageError;

pub(crate) fn required_column<'a>(
    frame: &'a DataFrame,
    name: &str,
) -> Result<&'a Column, StageError> {
    frame.column(name).map_err(|_| StageError::ColumnNotFound {
        column: name.to_string(),
    })
}
