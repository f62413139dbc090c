use thiserror::Error;

use crate::params::{GenerationParameters, ParameterViolation};
use crate::pathfind::PathfindingError;
use crate::random::RandomError;
use crate::store::StoreError;

/// Everything that can abort a generation request.
///
/// Only a validated "no solution found" outcome feeds the retry loop; every variant here
/// propagates immediately. There is no partial success: a request either returns a fully verified
/// level or one of these.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The parameter set violates its invariants. Not retried.
    #[error("invalid generation parameters: {0}")]
    InvalidParameters(#[from] ParameterViolation),
    /// The level seed was empty. Not retried.
    #[error("level seed must be a non-empty string")]
    InvalidSeed,
    /// The random provider was misused. A programming error, fatal.
    #[error(transparent)]
    Random(#[from] RandomError),
    /// Pathfinding was requested with out-of-grid endpoints, indicating a template bug.
    #[error(transparent)]
    Pathfinding(#[from] PathfindingError),
    /// The retry budget ran out without a solvable layout. Carries the scaled parameters so the
    /// caller can diagnose or deliberately relax them; this crate never relaxes them itself.
    #[error("no solvable layout found after {attempts} attempts")]
    UnsolvableLevel {
        /// How many layouts were generated and rejected.
        attempts: usize,
        /// The scaled parameters every attempt ran under.
        parameters: GenerationParameters,
    },
    /// The caller cancelled the request between retry iterations.
    #[error("generation cancelled before completion")]
    Cancelled,
    /// The persistence collaborator rejected the final write. Propagated unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}
