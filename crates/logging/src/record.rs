//! crates/logging/src/record.rs
//! Immutable snapshot of a single accepted logging call.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::level::Level;

/// Shared error object attached to a [`LogRecord`].
pub type ErrorRef = Arc<dyn Error + Send + Sync + 'static>;

/// One logging event as delivered to handlers.
///
/// Records are built once per accepted call and handed by reference to every
/// handler on the originating logger and its ancestors. Handlers that need to
/// keep a record beyond the call can clone it; the exception is shared rather
/// than copied.
#[derive(Clone)]
pub struct LogRecord {
    level: Level,
    message: String,
    exception: Option<ErrorRef>,
    logger_name: String,
    timestamp: DateTime<Utc>,
    sequence_number: u64,
}

impl LogRecord {
    /// Creates a record stamped with the current time.
    #[must_use]
    pub fn new(
        level: Level,
        message: impl Into<String>,
        logger_name: impl Into<String>,
        sequence_number: u64,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            exception: None,
            logger_name: logger_name.into(),
            timestamp: Utc::now(),
            sequence_number,
        }
    }

    /// Attaches an associated error object.
    #[must_use]
    pub fn with_exception(mut self, exception: Option<ErrorRef>) -> Self {
        self.exception = exception;
        self
    }

    /// Overrides the creation timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Severity of the event.
    #[must_use]
    pub const fn level(&self) -> &Level {
        &self.level
    }

    /// Message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Associated error object, if one was supplied.
    #[must_use]
    pub fn exception(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.exception.as_deref()
    }

    /// Name of the logger the call was made on, not the logger whose handler
    /// is currently running.
    #[must_use]
    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    /// Creation time.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Position of this record among all records accepted by its registry.
    #[must_use]
    pub const fn sequence_number(&self) -> u64 {
        self.sequence_number
    }
}

impl fmt::Debug for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRecord")
            .field("level", &self.level)
            .field("message", &self.message)
            .field("exception", &self.exception.as_ref().map(ToString::to_string))
            .field("logger_name", &self.logger_name)
            .field("timestamp", &self.timestamp)
            .field("sequence_number", &self.sequence_number)
            .finish()
    }
}
