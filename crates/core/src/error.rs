use polars::prelude::{DataFrame, PolarsError};
use thiserror::Error;

/// Failure inside a single stage's transformation logic.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("column not found: {column}")]
    ColumnNotFound { column: String },
    #[error("empty input: {message}")]
    EmptyInput { message: String },
    #[error("compute error: {0}")]
    Compute(#[from] PolarsError),
}

/// Why a pipeline run stopped short of completion.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("pipeline has no stages")]
    EmptyPipeline,
    #[error("stage '{stage}' requires columns missing from its input: {missing:?}")]
    Schema { stage: String, missing: Vec<String> },
    #[error("stage '{stage}' failed: {source}")]
    Stage {
        stage: String,
        #[source]
        source: StageError,
    },
    #[error("run cancelled before stage '{stage}'")]
    Cancelled { stage: String },
}

impl RunError {
    /// Name of the stage the run stopped at, when it got that far.
    pub fn stage(&self) -> Option<&str> {
        match self {
            Self::EmptyPipeline => None,
            Self::Schema { stage, .. } | Self::Stage { stage, .. } | Self::Cancelled { stage } => {
                Some(stage)
            }
        }
    }
}

/// Terminal outcome of a failed run. Outputs of stages that completed before
/// the failure are kept so callers can inspect them.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct RunFailure {
    #[source]
    pub error: RunError,
    pub partial_outputs: Vec<DataFrame>,
}
