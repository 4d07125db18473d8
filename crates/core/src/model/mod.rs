pub mod run;
pub mod stage;

pub use run::{RunRecord, RunStatus, StageOutcome};
pub use stage::{standard_stages, StageKind, StageSpec};
