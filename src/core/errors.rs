//! Error types for the monosyl-rs library.
//!
//! Structured error types that preserve context and enable proper error
//! propagation throughout the batch pipeline. Almost everything in the
//! pipeline is best-effort: a bad word degrades, it does not abort. The
//! variants here cover the genuinely fatal conditions (missing inputs,
//! corrupt caches) plus the I/O and serialization plumbing.

use std::io;

use thiserror::Error;

/// Main result type for monosyl operations.
pub type Result<T> = std::result::Result<T, MonosylError>;

/// Comprehensive error type for all monosyl operations.
#[derive(Error, Debug)]
pub enum MonosylError {
    /// I/O related errors (file operations)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Dictionary and input parsing errors
    #[error("Parse error in {input}: {message}")]
    Parse {
        /// Input file or source being parsed
        input: String,
        /// Error description
        message: String,
        /// Line number (if available)
        line: Option<usize>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Input validation errors
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
    },

    /// Pipeline stage errors
    #[error("Pipeline error at stage '{stage}': {message}")]
    Pipeline {
        /// Pipeline stage where the error occurred
        stage: String,
        /// Error description
        message: String,
    },
}

impl MonosylError {
    /// Create an I/O error with context.
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a configuration error scoped to a specific field.
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a parse error for a named input.
    pub fn parse(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            message: message.into(),
            line: None,
        }
    }

    /// Create a parse error pinned to a line number.
    pub fn parse_at(
        input: impl Into<String>,
        message: impl Into<String>,
        line: usize,
    ) -> Self {
        Self::Parse {
            input: input.into(),
            message: message.into(),
            line: Some(line),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a pipeline stage error.
    pub fn pipeline(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Pipeline {
            stage: stage.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for MonosylError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for MonosylError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<bincode::Error> for MonosylError {
    fn from(err: bincode::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
