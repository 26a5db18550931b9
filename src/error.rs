//! Error types for expression construction and statement compilation.

/// Errors raised by the builders and the compile pass.
///
/// All errors are raised synchronously at the call that violates the
/// contract; nothing at this layer retries or silently defaults, with one
/// documented exception: CASE result-type inference degrades to `"string"`
/// when branch types disagree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A value or argument has the wrong shape: tuple arity mismatch,
    /// duplicate CTE alias, negative window frame offset, malformed
    /// operator suffix, NULL used as a CASE `when` value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A builder was compiled in an invalid terminal state: a WITH clause
    /// with no expressions, a CASE with no when/then pairs.
    #[error("invalid builder state: {0}")]
    InvalidState(String),

    /// A type name was requested that is not registered.
    #[error("unknown type `{0}`")]
    UnknownType(String),
}

pub type Result<T> = std::result::Result<T, Error>;
