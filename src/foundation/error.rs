/// Crate-wide result type.
pub type PathValueResult<T> = Result<T, PathValueError>;

/// Construction-time failures. Nothing in this crate fails after an
/// [`AnimatablePathValue`](crate::AnimatablePathValue) has been built.
#[derive(thiserror::Error, Debug)]
pub enum PathValueError {
    /// The property carries no usable value payload.
    #[error("missing value: {0}")]
    MissingValue(String),

    /// A static value or point could not be decoded.
    #[error("malformed value: {0}")]
    MalformedValue(String),

    /// A keyframe record could not be decoded.
    #[error("malformed keyframe #{index}: {reason} (keyframe: {keyframe})")]
    MalformedKeyframe {
        /// Position of the keyframe in the input list.
        index: usize,
        /// JSON text of the offending record.
        keyframe: String,
        /// What failed to decode.
        reason: String,
    },

    /// The resolved end frame does not exceed the start frame.
    #[error("invalid frame span {start}->{end}")]
    InvalidSpan {
        /// First time marker.
        start: i64,
        /// Last time marker.
        end: i64,
    },

    /// The compiled path, key times and easings do not line up.
    #[error(
        "misaligned timeline: {vertices} path vertices, {key_times} key times, {easings} easings"
    )]
    MisalignedTimeline {
        /// Number of path vertices, including the initial move.
        vertices: usize,
        /// Number of key times, including the leading zero.
        key_times: usize,
        /// Number of per-segment easings.
        easings: usize,
    },

    /// Invalid configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON-level failure outside keyframe decoding.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PathValueError {
    /// Build a [`PathValueError::MissingValue`].
    pub fn missing(msg: impl Into<String>) -> Self {
        Self::MissingValue(msg.into())
    }

    /// Build a [`PathValueError::MalformedValue`].
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedValue(msg.into())
    }

    /// Build a [`PathValueError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PathValueError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`PathValueError::MalformedKeyframe`] for the keyframe at `index`.
    pub fn keyframe(index: usize, keyframe: &impl serde::Serialize, reason: impl Into<String>) -> Self {
        let keyframe = serde_json::to_string(keyframe).unwrap_or_else(|_| "<unprintable>".into());
        Self::MalformedKeyframe {
            index,
            keyframe,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for PathValueError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
