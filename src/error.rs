use thiserror::Error;

/// Errors returned by tree construction and proof generation.
///
/// Proof verification deliberately does not use this channel: an invalid
/// proof is a normal `false` outcome, not an exceptional one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// [`construct`](crate::merkle::Tree::construct) was called on a tree
    /// that was already built.
    #[error("tree is not empty")]
    InvalidState,

    /// [`construct`](crate::merkle::Tree::construct) was called with no
    /// values.
    #[error("no values")]
    EmptyInput,

    /// A level lookup was given a height outside `[1, height]`.
    #[error("height {0} out of range")]
    HeightOutOfRange(usize),

    /// The value's digest is not present among the current leaves.
    #[error("value not found")]
    NotFound,

    /// A structural invariant did not hold. Indicates a bug in the tree
    /// itself rather than misuse.
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),

    /// A serialized proof could not be decoded.
    #[error("malformed proof: {0}")]
    MalformedProof(String),
}

/// Result alias for fallible tree operations.
pub type Result<T> = std::result::Result<T, Error>;
