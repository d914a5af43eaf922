use cohort_model::ModelError;
use thiserror::Error;

/// Failures that abort an enumeration run.
///
/// No partial result is returned with any of these: pruning decisions made
/// before the failure may already have shaped the accepted candidates.
#[derive(Debug, Error)]
pub enum SearchError<E>
where
    E: std::error::Error + 'static,
{
    /// A generated candidate broke a structural invariant (value tuple and
    /// dimension subset lengths differ). Indicates a bug in the generator.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(#[source] ModelError),
    #[error("validity oracle failed: {0}")]
    Oracle(#[source] E),
    #[error("search cancelled after {evaluated} oracle calls")]
    Cancelled { evaluated: usize },
}
