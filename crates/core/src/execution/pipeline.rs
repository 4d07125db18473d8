use std::collections::BTreeSet;

use chrono::Utc;
use polars::prelude::DataFrame;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use uuid::Uuid;

use crate::engine::{execute_analyze, execute_clean, execute_summary};
use crate::error::{RunError, RunFailure, StageError};
use crate::execution::cancel::CancelToken;
use crate::model::{RunRecord, RunStatus, StageKind, StageOutcome, StageSpec};

/// Options for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Fixed seed for the randomized clean stage; `None` draws from entropy,
    /// so two unseeded runs produce different `Revenue` values.
    pub seed: Option<u64>,
    /// Checked between stages; a triggered token aborts before the next stage
    /// starts.
    pub cancel: Option<CancelToken>,
}

pub fn execute_pipeline(
    stages: &[StageSpec],
    input: DataFrame,
) -> Result<Vec<DataFrame>, RunFailure> {
    execute_pipeline_with_options(stages, input, &RunOptions::default())
}

/// Runs the stages strictly in order, feeding each stage the frame the
/// previous one produced. Returns one output frame per stage. On failure the
/// outputs of already-completed stages ride along in the `RunFailure`.
pub fn execute_pipeline_with_options(
    stages: &[StageSpec],
    input: DataFrame,
    options: &RunOptions,
) -> Result<Vec<DataFrame>, RunFailure> {
    validate_stage_chain(stages, &input).map_err(|error| RunFailure {
        error,
        partial_outputs: Vec::new(),
    })?;

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut outputs: Vec<DataFrame> = Vec::with_capacity(stages.len());
    let mut current = input;
    for spec in stages {
        if options.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(RunFailure {
                error: RunError::Cancelled {
                    stage: spec.name.clone(),
                },
                partial_outputs: outputs,
            });
        }

        debug!(stage = %spec.name, rows = current.height(), "executing stage");
        let produced = match run_stage(spec, &current, &mut rng) {
            Ok(frame) => frame,
            Err(source) => {
                return Err(RunFailure {
                    error: RunError::Stage {
                        stage: spec.name.clone(),
                        source,
                    },
                    partial_outputs: outputs,
                });
            }
        };

        outputs.push(produced.clone());
        current = produced;
    }

    Ok(outputs)
}

/// One output per completed stage, paired with the run's record.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub record: RunRecord,
    pub outputs: Vec<DataFrame>,
}

/// Infallible driver entry point: runs the pipeline and folds the outcome
/// into a serializable [`RunRecord`] alongside whatever outputs completed.
pub fn execute_run(stages: &[StageSpec], input: DataFrame, options: &RunOptions) -> RunReport {
    let started_at = Utc::now();
    let result = execute_pipeline_with_options(stages, input, options);
    let completed_at = Utc::now();

    let (status, outputs, error) = match result {
        Ok(outputs) => (RunStatus::Completed, outputs, None),
        Err(failure) => {
            let status = match failure.error {
                RunError::Cancelled { .. } => RunStatus::Cancelled,
                _ => RunStatus::Failed,
            };
            (status, failure.partial_outputs, Some(failure.error.to_string()))
        }
    };

    let stage_outcomes = stages
        .iter()
        .zip(&outputs)
        .map(|(spec, frame)| StageOutcome {
            stage: spec.name.clone(),
            rows: frame.height(),
            columns: frame.width(),
        })
        .collect();

    RunReport {
        record: RunRecord {
            id: Uuid::now_v7(),
            seed: options.seed,
            status,
            stages: stage_outcomes,
            error,
            started_at,
            completed_at,
        },
        outputs,
    }
}

fn run_stage(
    spec: &StageSpec,
    input: &DataFrame,
    rng: &mut StdRng,
) -> Result<DataFrame, StageError> {
    match spec.kind {
        StageKind::Clean => execute_clean(input, rng),
        StageKind::Analyze => execute_analyze(input),
        StageKind::Summarize => execute_summary(input),
    }
}

/// Structural pre-check run before any stage executes: every stage's required
/// columns must be satisfied by the input columns plus the declared outputs
/// of the stages upstream of it.
fn validate_stage_chain(stages: &[StageSpec], input: &DataFrame) -> Result<(), RunError> {
    if stages.is_empty() {
        return Err(RunError::EmptyPipeline);
    }

    let mut available: BTreeSet<String> = input
        .get_column_names()
        .iter()
        .map(|name| name.as_str().to_string())
        .collect();

    for spec in stages {
        let missing: Vec<String> = spec
            .kind
            .required_columns()
            .iter()
            .filter(|column| !available.contains(**column))
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(RunError::Schema {
                stage: spec.name.clone(),
                missing,
            });
        }
        available = spec.kind.output_columns(&available);
    }

    Ok(())
}
