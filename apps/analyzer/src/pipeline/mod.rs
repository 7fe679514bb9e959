// Analysis pipeline: parse → classify → (skill-gap ∥ ATS) → readiness → aggregate.
// Only the orchestrator touches the remote clients; aggregator and readiness are pure.

use thiserror::Error;

use crate::services::ServiceError;

pub mod aggregator;
pub mod orchestrator;
pub mod readiness;

pub use orchestrator::{Orchestrator, PipelineSnapshot};

/// A fatal stage failure. Aborts the run; the caller still receives the error report.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to parse resume: {0}")]
    Parse(#[source] ServiceError),

    #[error("Failed to classify resume: {0}")]
    Classify(#[source] ServiceError),
}
