//! Error types for the chatmark transcoder.
//!
//! Provides [`TranscodeError`] for failures of a single transcoding call and
//! [`ConfigError`] for malformed formatting configuration. Both are
//! non-exhaustive to allow future extension without breaking downstream.

use thiserror::Error;

/// Error returned by a transcoding call.
///
/// There is no partial-success mode: when a call fails the caller should
/// not deliver the message at all. Sending the raw text instead would
/// defeat the strict dialect's escaping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TranscodeError {
    // ── Input ────────────────────────────────────────────────────────

    /// Every sentinel candidate already occurs in the input, so no
    /// collision-free placeholder can be built.
    #[error("input contains all {candidates} placeholder sentinel candidates")]
    ConflictingInput {
        /// How many sentinel characters were tried.
        candidates: usize,
    },

    // ── Fatal ────────────────────────────────────────────────────────

    /// The pipeline broke one of its own invariants (unresolved,
    /// duplicated or truncated placeholder). This is a transcoder defect.
    #[error("internal transcoder error: {reason}")]
    Internal {
        /// What invariant was violated.
        reason: String,
    },
}

impl TranscodeError {
    /// Build an [`TranscodeError::Internal`] from anything printable.
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }

    /// Whether the failure comes from the input rather than a defect.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::ConflictingInput { .. })
    }
}

/// Configuration-specific error type.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// JSON serialization / deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A format name did not match any known dialect or passthrough alias.
    #[error("unknown output format: {0}")]
    UnknownFormat(String),
}

/// A convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TranscodeError>;
