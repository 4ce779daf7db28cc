// In: src/error.rs

//! This module defines the single, unified error type for the entire memconv library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Every error is terminal: a stage either completes fully or the whole run aborts
//! with the specific kind and the offending parameter.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemconvError {
    // =========================================================================
    // === Input & Configuration Errors
    // =========================================================================
    /// A malformed hex-dump line, an odd digit count, a dump with no records,
    /// or kernel text that cannot be parsed.
    #[error("Format error: {0}")]
    FormatError(String),

    /// A requested byte window extends past the end of the decoded buffer.
    #[error("{what} out of range: need {needed} bytes at 0x{offset:x}, buffer holds {available}")]
    OutOfRange {
        what: &'static str,
        offset: u64,
        needed: usize,
        available: usize,
    },

    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    #[error("Unsupported {kind}: '{name}'")]
    UnsupportedOption { kind: &'static str, name: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the underlying I/O subsystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically while loading a config.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// An error from a safe byte-casting operation failing.
    #[error("Byte slice casting error: {0}")]
    PodCast(String), // Manual `From` impl is needed as bytemuck::PodCastError doesn't impl Error

    // =========================================================================
    // === Pipeline Errors
    // =========================================================================
    #[error("Pipeline execution failed at stage '{stage}': {source}")]
    PipelineError {
        stage: &'static str,
        #[source]
        source: Box<MemconvError>,
    },
}

impl MemconvError {
    /// Wraps an error with the name of the pipeline stage that raised it.
    pub fn at_stage(self, stage: &'static str) -> Self {
        MemconvError::PipelineError {
            stage,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through any stage wrappers.
    pub fn root_cause(&self) -> &MemconvError {
        match self {
            MemconvError::PipelineError { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

impl From<bytemuck::PodCastError> for MemconvError {
    fn from(err: bytemuck::PodCastError) -> Self {
        MemconvError::PodCast(err.to_string())
    }
}

impl From<hex::FromHexError> for MemconvError {
    fn from(err: hex::FromHexError) -> Self {
        MemconvError::FormatError(err.to_string())
    }
}
