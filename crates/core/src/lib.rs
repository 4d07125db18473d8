pub mod engine;
pub mod error;
pub mod execution;
pub mod model;
pub mod sample;

pub use engine::{execute_analyze, execute_clean, execute_summary};
pub use error::{RunError, RunFailure, StageError};
pub use execution::cancel::CancelToken;
pub use execution::pipeline::{
    execute_pipeline, execute_pipeline_with_options, execute_run, RunOptions, RunReport,
};
pub use model::{standard_stages, RunRecord, RunStatus, StageKind, StageOutcome, StageSpec};
pub use sample::{generate_sample_data, SAMPLE_ROWS};
