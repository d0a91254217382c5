use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use logging::{Handler, HandlerError, LogRecord};

use super::render::render_record;
use crate::line_mode::LineMode;

/// Handler that renders each record with [`render_record`] and writes it to `W`.
///
/// The writer is guarded by a mutex so one sink can be shared between loggers
/// and threads through a [`HandlerRef`](logging::HandlerRef). Each record is
/// written with a single `write_all` call; write failures surface as
/// [`HandlerError::Io`] and are reported by the dispatching logger.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use logging::{HandlerRef, LogManager};
/// use logging_sink::{LineMode, RecordSink};
///
/// let sink = Arc::new(RecordSink::new(Vec::new()));
/// let manager = LogManager::new();
/// manager.root().add_handler(Arc::clone(&sink) as HandlerRef);
///
/// manager.get_logger("db").warning("slow query");
/// drop(manager);
///
/// let sink = Arc::into_inner(sink).expect("sole owner");
/// let output = String::from_utf8(sink.into_inner()).unwrap();
/// assert!(output.ends_with(" WARNING [db] slow query\n"));
/// ```
pub struct RecordSink<W> {
    state: Mutex<SinkState<W>>,
}

struct SinkState<W> {
    writer: W,
    line_mode: LineMode,
}

impl<W> RecordSink<W> {
    /// Creates a sink that terminates each record with a newline.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a sink with an explicit [`LineMode`].
    #[must_use]
    pub const fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            state: Mutex::new(SinkState { writer, line_mode }),
        }
    }

    /// Current newline policy.
    pub fn line_mode(&self) -> LineMode {
        self.lock().line_mode
    }

    /// Changes the newline policy for subsequent records.
    pub fn set_line_mode(&self, line_mode: LineMode) {
        self.lock().line_mode = line_mode;
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .writer
    }

    fn lock(&self) -> MutexGuard<'_, SinkState<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RecordSink<io::Stderr> {
    /// Creates a sink writing to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> RecordSink<W> {
    /// Renders and writes one record using the current [`LineMode`].
    pub fn write_record(&self, record: &LogRecord) -> io::Result<()> {
        let mut state = self.lock();
        let mut line = render_record(record);
        if state.line_mode.append_newline() {
            line.push('\n');
        }
        state.writer.write_all(line.as_bytes())
    }

    /// Flushes the underlying writer.
    pub fn flush(&self) -> io::Result<()> {
        self.lock().writer.flush()
    }
}

impl<W: Write + Send> Handler for RecordSink<W> {
    fn publish(&self, record: &LogRecord) -> Result<(), HandlerError> {
        self.write_record(record)?;
        Ok(())
    }
}

impl<W> fmt::Debug for RecordSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSink")
            .field("line_mode", &self.line_mode())
            .finish_non_exhaustive()
    }
}
