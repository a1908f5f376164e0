/// Errors produced by the `relay-core` crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A bridged callback operation signalled failure.
    #[error("{message}")]
    BridgeFailure { message: String },

    /// The resolution cell closed without ever delivering an outcome.
    #[error("continuation closed without a result")]
    ContinuationLost,

    /// A user record failed validation.
    #[error("invalid user: {reason}")]
    InvalidUser { reason: String },
}
