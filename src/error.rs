//! Error type shared by the escaping dispatcher and the wasm surface.

use thiserror::Error;

/// Errors surfaced to callers.
///
/// Handle-resolution misses are not errors (they pass the mention through),
/// and truncation is total, so this enum stays small.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The content type tag is not one of the recognized escaping policies.
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// Configuration payload could not be decoded.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, FormatError>;
