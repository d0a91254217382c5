use std::mem;
use std::sync::{Mutex, MutexGuard, PoisonError};

use logging::{Handler, HandlerError, LogRecord};

/// Handler that keeps a copy of every record it receives.
///
/// Useful for tests and for buffering records until an output is configured.
#[derive(Debug, Default)]
pub struct MemoryHandler {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryHandler {
    /// Creates an empty handler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every captured record in arrival order.
    pub fn drain(&self) -> Vec<LogRecord> {
        mem::take(&mut *self.lock())
    }

    /// Number of captured records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether no record has been captured since the last drain.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Messages of the captured records, without draining them.
    pub fn messages(&self) -> Vec<String> {
        self.lock()
            .iter()
            .map(|record| record.message().to_owned())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Handler for MemoryHandler {
    fn publish(&self, record: &LogRecord) -> Result<(), HandlerError> {
        self.lock().push(record.clone());
        Ok(())
    }
}
