//! Error types for the tween engine and its host adapters.

use thiserror::Error;

/// Failure reported by a host adapter while reading or writing a curve.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct HostError {
    pub message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TweenError {
    /// The curve has no key strictly before or strictly after the requested time.
    /// Non-fatal: the engine skips the curve when it sees this.
    #[error("no bounding keys on curve {curve} around time {time}")]
    NoBoundingKey { curve: String, time: f64 },

    /// A tangent/value read (or the default tangent query) failed.
    #[error("host query failed on curve {curve}: {source}")]
    HostQuery {
        curve: String,
        #[source]
        source: HostError,
    },

    /// Writing the new key, its in-tangent, or a key decoration failed.
    #[error("host write failed on curve {curve} at time {time}: {source}")]
    HostWrite {
        curve: String,
        time: f64,
        #[source]
        source: HostError,
    },

    #[error("bias {value} is outside [{min}, {max}]")]
    InvalidBias { value: f64, min: f64, max: f64 },

    /// The time to key at is NaN or infinite.
    #[error("time {time} is not finite")]
    InvalidTime { time: f64 },

    #[error("unknown tangent type '{tag}'")]
    UnknownTangent { tag: String },

    #[error("invalid curve '{curve}': {reason}")]
    InvalidCurve { curve: String, reason: String },

    #[error("parse error: {0}")]
    Parse(String),
}

impl TweenError {
    /// Errors that abort a batch (everything except a missing bounding key).
    #[inline]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, TweenError::NoBoundingKey { .. })
    }
}
