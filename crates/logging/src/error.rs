//! crates/logging/src/error.rs
//!
//! Error types for level parsing, configuration, and handler dispatch.
//!
//! None of these ever escape a logging call: handler failures are reported
//! through `tracing` and swallowed, and disabled logging is a neutral no-op.

use std::io;

use thiserror::Error;

/// Error returned when a string does not name a predefined level or a numeric weight.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unrecognised log level '{input}'")]
pub struct LevelParseError {
    input: String,
}

impl LevelParseError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Errors produced while building a [`LoggingConfig`](crate::LoggingConfig).
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ConfigError {
    /// A level directive carried an unknown level.
    #[error("invalid level in directive '{directive}': {source}")]
    InvalidLevel {
        /// The offending directive token.
        directive: String,
        /// The underlying parse failure.
        #[source]
        source: LevelParseError,
    },
    /// A directive token was empty.
    #[error("empty level directive")]
    EmptyDirective,
    /// The enabled flag could not be interpreted as a boolean.
    #[error("invalid boolean '{0}' for LOGGING_ENABLED")]
    InvalidFlag(String),
}

/// Failure reported by a [`Handler`](crate::Handler) while publishing a record.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Writing the rendered record failed.
    #[error("I/O error: {0}")]
    Io(
        #[from]
        #[source]
        io::Error,
    ),
    /// Handler-specific failure.
    #[error("handler failed: {0}")]
    Failed(String),
}

impl HandlerError {
    /// Creates a [`HandlerError::Failed`] from any displayable reason.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io::ErrorKind;

    #[test]
    fn level_parse_error_keeps_input() {
        let err = LevelParseError::new("LOUD");
        assert_eq!(err.input(), "LOUD");
        assert!(err.to_string().contains("LOUD"));
    }

    #[test]
    fn invalid_level_directive_exposes_source() {
        let err = ConfigError::InvalidLevel {
            directive: "a=LOUD".to_owned(),
            source: LevelParseError::new("LOUD"),
        };

        assert!(err.to_string().contains("a=LOUD"));
        assert!(err.source().is_some());
    }

    #[test]
    fn handler_io_error_from_std_io_error() {
        let io_err = io::Error::new(ErrorKind::BrokenPipe, "pipe closed");
        let err: HandlerError = io_err.into();

        assert!(matches!(err, HandlerError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
        assert!(err.source().is_some());
    }

    #[test]
    fn handler_failed_message() {
        let err = HandlerError::failed("queue full");
        assert_eq!(err.to_string(), "handler failed: queue full");
    }
}
