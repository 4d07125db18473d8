pub mod cancel;
pub mod pipeline;

pub use cancel::CancelToken;
pub use pipeline::{
    execute_pipeline, execute_pipeline_with_options, execute_run, RunOptions, RunReport,
};
