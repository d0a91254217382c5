use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use logging::LogRecord;

/// Timestamp layout used by [`render_record`]: UTC with millisecond precision.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Renders `record` as a single line without a terminator.
///
/// The layout is `"<timestamp> <LEVEL> [<logger>] <message>"`, followed by
/// `": <error>"` when the record carries an exception. The root logger renders
/// as `[]`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use logging::{Level, LogRecord};
/// use logging_sink::render_record;
///
/// let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
/// let record = LogRecord::new(Level::WARNING, "disk almost full", "storage", 7)
///     .with_timestamp(stamp);
///
/// assert_eq!(
///     render_record(&record),
///     "2024-05-01 12:30:00.000 WARNING [storage] disk almost full"
/// );
/// ```
#[must_use]
pub fn render_record(record: &LogRecord) -> String {
    let mut line = String::with_capacity(48 + record.message().len());
    let _ = write!(
        line,
        "{} {} [{}] {}",
        format_timestamp(record.timestamp()),
        record.level(),
        record.logger_name(),
        record.message()
    );
    if let Some(exception) = record.exception() {
        let _ = write!(line, ": {exception}");
    }
    line
}

fn format_timestamp(timestamp: DateTime<Utc>) -> impl std::fmt::Display {
    timestamp.format(TIMESTAMP_FORMAT)
}
