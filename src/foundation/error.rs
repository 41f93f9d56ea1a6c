/// Crate-wide result alias.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Failures that abort a conversion or merge run.
///
/// Per-shape diffing failures are not errors: the synthesizer recovers from them and reports
/// them as [`crate::synth::SkippedShape`] values instead.
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    /// A required shape or layer attribute is missing or could not be coerced.
    #[error("malformed attribute: {0}")]
    MalformedAttribute(String),

    /// A sampled frame does not have the same shape count as frame zero.
    #[error(
        "frame mismatch: frame {frame} has {found} {role} shapes, frame zero has {expected}"
    )]
    FrameMismatch {
        /// Index of the offending frame in the extracted sequence.
        frame: usize,
        /// Role group (`fills` or `strokes`) whose count differs.
        role: &'static str,
        /// Shape count in frame zero.
        expected: usize,
        /// Shape count in the offending frame.
        found: usize,
    },

    /// The next sampled pair would end past the representable timeline.
    #[error("timeline overflow: pair starting at {start} cannot advance by {step}")]
    TimeOverflow { start: u64, step: u64 },

    /// A merge input could not be decoded into a document.
    #[error("document format error: {0}")]
    DocumentFormat(String),

    /// Filesystem failure while reading inputs or writing outputs.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failure.
    #[error("serialization error: {0}")]
    Json(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConvertError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedAttribute(msg.into())
    }

    pub fn document_format(msg: impl Into<String>) -> Self {
        Self::DocumentFormat(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }
}
