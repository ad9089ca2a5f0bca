//! Error types surfaced by the detection and generation core.

use thiserror::Error;

/// Errors produced by the parser registry and individual format parsers.
#[derive(Debug, Error)]
pub enum IdError {
    /// No parser accepted the input in auto-detect mode.
    #[error("unrecognized identifier '{0}'")]
    UnrecognizedFormat(String),

    /// The explicitly requested parser could not parse the input.
    #[error("input cannot be parsed as format '{0}'")]
    ForcedFormatMismatch(String),

    /// Force-mode or generate-mode named a format not in the registry.
    #[error("unknown format name '{0}'")]
    UnknownFormatName(String),

    /// Input passed the admissibility check but failed the structural decode.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The underlying generation primitive failed.
    #[error("generation failed: {0}")]
    Generation(String),
}

impl IdError {
    pub fn decode(msg: impl Into<String>) -> Self {
        IdError::Decode(msg.into())
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        IdError::Generation(msg.into())
    }
}
