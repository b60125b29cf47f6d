//! Error types for the hypercube puzzle core.

use thiserror::Error;

/// Root error type for every fallible hypercube operation.
///
/// An incorrect submission is not represented here: it is an ordinary
/// puzzle outcome, reported through [`crate::puzzle::SubmissionOutcome`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HypercubeError {
    /// Topology generation produced the wrong number of cells.
    #[error("construction invariant violated: expected {expected} {what}, found {found}")]
    ConstructionInvariant {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// An axis index outside `0..4`.
    #[error("invalid axis index {0}, expected 0..=3")]
    InvalidAxis(usize),

    /// A face id outside `0..8`.
    #[error("invalid face id {0}, expected 0..=7")]
    InvalidFace(usize),

    /// A malformed letter pair, unknown button or degenerate rotation.
    #[error("invalid rotation command: {0}")]
    InvalidRotationCommand(String),

    /// A direction label that is not of the form `+X` / `-W`.
    #[error("invalid direction label: {0:?}")]
    InvalidDirection(String),

    /// Submission while the engine still has an active or queued rotation.
    #[error("cannot submit while the hypercube is still rotating")]
    PrematureSubmission,

    /// A mode change requested while a rotation is active or queued.
    #[error("the hypercube is still rotating")]
    Busy,

    /// The puzzle has already been solved and accepts no more commands.
    #[error("the puzzle is already solved")]
    AlreadySolved,

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}

pub type HypercubeResult<T> = Result<T, HypercubeError>;
