// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for gocheck-subunit

use thiserror::Error;

/// Errors that can occur while translating gocheck output
///
/// Unrecognized test output is never an error. The only failure raised by
/// the parser itself is [`ReportError::InvalidPattern`], which means the
/// classifier's own rule set is broken; the remaining variants come from
/// sinks.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A line-matching pattern failed to compile
    #[error("Invalid line pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern text that was rejected
        pattern: String,
        /// The underlying regex compilation error
        #[source]
        source: regex::Error,
    },

    /// Error writing events to an output stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error serializing an event
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A sink refused an event
    #[error("Sink rejected event: {message}")]
    Sink {
        /// Description of the delivery failure
        message: String,
    },
}

impl ReportError {
    /// Create a sink delivery error
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink {
            message: message.into(),
        }
    }

    /// Whether this error is a broken-rule-set fault rather than a delivery failure
    #[must_use]
    pub fn is_configuration_fault(&self) -> bool {
        matches!(self, Self::InvalidPattern { .. })
    }
}
