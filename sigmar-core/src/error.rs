//! Error types

use crate::marble::Marble;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SigmarError {
    /// Requested board variant or shape is not one this crate defines
    #[error("unsupported board configuration: {0}")]
    Configuration(String),

    /// Malformed input, e.g. a bad neighbour set or an illegal move
    #[error("validation failed: {0}")]
    Validation(String),

    /// The wavefront could not find a legal cell for a marble
    #[error("no legal placement for {marble} after placing {placed} of {total} marbles")]
    GenerationFailure {
        marble: Marble,
        placed: usize,
        total: usize,
    },

    #[error("cannot choose from an empty {0}")]
    EmptyCollection(&'static str),
}

pub type Result<T> = std::result::Result<T, SigmarError>;
