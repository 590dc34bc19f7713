use crate::fetch::FetchError;
use thiserror::Error;

/// Unified error type for the cachetrace facade.
///
/// This aggregates every failure class the facade can surface. Nothing is
/// retried internally; retry policy belongs to the caller. A missing key on
/// retrieve is not an error, it is a defined absent result.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying key-value store was unreachable or a command failed
    /// (including wrong-type access and incrementing non-numeric bytes).
    #[error("key-value store unavailable: {0}")]
    StoreUnavailable(String),

    /// Retrieved bytes could not be converted to the requested type.
    #[error("coercion to {target} failed: {detail}")]
    Coercion {
        target: &'static str,
        detail: String,
    },

    /// A call history's input and output logs disagree on length.
    #[error("call history for `{name}` is corrupted: {inputs} inputs vs {outputs} outputs")]
    DataCorruption {
        name: String,
        inputs: usize,
        outputs: usize,
    },

    /// The fetch collaborator failed.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A history log entry could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a store-level error from a command failure message.
    pub fn store(msg: impl Into<String>) -> Self {
        Error::StoreUnavailable(msg.into())
    }

    /// Create a coercion error for the given target type.
    pub fn coercion(target: &'static str, detail: impl Into<String>) -> Self {
        Error::Coercion {
            target,
            detail: detail.into(),
        }
    }
}
