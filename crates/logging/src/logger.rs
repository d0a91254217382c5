//! crates/logging/src/logger.rs
//! Borrowed handle to a node of a [`LogManager`] hierarchy.

use std::fmt;
use std::ptr;

use crate::handler::HandlerRef;
use crate::level::Level;
use crate::manager::{LogManager, LoggerId};
use crate::record::{ErrorRef, LogRecord};

/// Named logger in a dotted hierarchy.
///
/// A `Logger` is a cheap `Copy` handle; the node it refers to is owned by the
/// [`LogManager`] it was obtained from and cannot outlive it. Two handles
/// compare equal when they address the same node of the same registry.
///
/// A record is accepted when its level is at least the logger's
/// [effective level](Self::effective_level) and is then delivered to the
/// handlers of this logger followed by those of each ancestor up to the root.
#[derive(Clone, Copy)]
pub struct Logger<'a> {
    manager: &'a LogManager,
    id: LoggerId,
}

macro_rules! severity_methods {
    ($($level:ident => $plain:ident, $with:ident;)*) => {
        $(
            #[doc = concat!("Logs `message` at [`Level::", stringify!($level), "`].")]
            pub fn $plain(&self, message: impl Into<String>) {
                self.log(Level::$level, message, None);
            }

            #[doc = concat!(
                "Logs `message` with an associated error at [`Level::",
                stringify!($level),
                "`]."
            )]
            pub fn $with(&self, message: impl Into<String>, exception: ErrorRef) {
                self.log(Level::$level, message, Some(exception));
            }
        )*
    };
}

impl<'a> Logger<'a> {
    pub(crate) const fn new(manager: &'a LogManager, id: LoggerId) -> Self {
        Self { manager, id }
    }

    /// Registry that owns this logger.
    #[must_use]
    pub const fn manager(&self) -> &'a LogManager {
        self.manager
    }

    /// Arena id of this logger.
    #[must_use]
    pub const fn id(&self) -> LoggerId {
        self.id
    }

    /// Full dotted name. The root logger's name is empty.
    #[must_use]
    pub fn name(&self) -> String {
        self.manager.name_of(self.id)
    }

    /// Reports whether this is the root logger.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.id == LoggerId::ROOT
    }

    /// Nearest ancestor, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.manager
            .parent_of(self.id)
            .map(|id| Self::new(self.manager, id))
    }

    /// Direct children in creation order.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        self.manager
            .children_of(self.id)
            .into_iter()
            .map(|id| Self::new(self.manager, id))
            .collect()
    }

    /// Explicit threshold, or `None` when inherited.
    #[must_use]
    pub fn level(&self) -> Option<Level> {
        self.manager.level_of(self.id)
    }

    /// Sets the explicit threshold; `None` reverts to inheriting from the parent.
    pub fn set_level(&self, level: Option<Level>) {
        self.manager.set_level_of(self.id, level);
    }

    /// Threshold in force: the nearest explicit level from this logger up to
    /// the root, or [`DEFAULT_LEVEL`](crate::DEFAULT_LEVEL) if none is set.
    #[must_use]
    pub fn effective_level(&self) -> Level {
        self.manager.effective_level_of(self.id)
    }

    /// Reports whether a record at `level` would be accepted.
    ///
    /// Always `false` when the registry is disabled or `level` is
    /// [`Level::OFF`].
    #[must_use]
    pub fn is_loggable(&self, level: &Level) -> bool {
        self.manager.is_loggable(self.id, level)
    }

    /// Logs `message` at `level` with an optional associated error.
    ///
    /// Does nothing if the level is not loggable. Handler failures are
    /// reported through `tracing` and never reach the caller.
    pub fn log(&self, level: Level, message: impl Into<String>, exception: Option<ErrorRef>) {
        self.manager.log_at(self.id, level, message, exception);
    }

    /// Dispatches a caller-built record after checking its level.
    ///
    /// The record is delivered as-is, including its logger name and sequence
    /// number. Returns the number of handlers that completed successfully.
    pub fn log_record(&self, record: &LogRecord) -> usize {
        if !self.is_loggable(record.level()) {
            return 0;
        }
        self.manager.dispatch(self.id, record)
    }

    severity_methods! {
        SHOUT => shout, shout_with;
        SEVERE => severe, severe_with;
        WARNING => warning, warning_with;
        INFO => info, info_with;
        CONFIG => config, config_with;
        FINE => fine, fine_with;
        FINER => finer, finer_with;
        FINEST => finest, finest_with;
    }

    /// Appends `handler` to this logger. Duplicates are allowed.
    pub fn add_handler(&self, handler: HandlerRef) {
        self.manager.add_handler_to(self.id, handler);
    }

    /// Removes the first registration of `handler` (by pointer identity).
    ///
    /// Returns `true` if a registration was removed.
    pub fn remove_handler(&self, handler: &HandlerRef) -> bool {
        self.manager.remove_handler_from(self.id, handler)
    }

    /// Number of handlers registered directly on this logger.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.manager.handler_count_of(self.id)
    }
}

impl PartialEq for Logger<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.manager, other.manager) && self.id == other.id
    }
}

impl Eq for Logger<'_> {}

impl fmt::Debug for Logger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::handler_fn;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (HandlerRef, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handler = handler_fn(move |record| {
            sink.lock()
                .unwrap()
                .push(format!("{} {}", record.level(), record.message()));
            Ok(())
        });
        (handler, seen)
    }

    #[test]
    fn convenience_methods_use_matching_levels() {
        let manager = LogManager::new();
        let logger = manager.get_logger("app");
        let (handler, seen) = recorder();
        logger.add_handler(handler);

        logger.shout("a");
        logger.severe("b");
        logger.warning("c");
        logger.info("d");
        logger.config("e");
        logger.fine("f");
        logger.finer("g");
        logger.finest("h");

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "SHOUT a", "SEVERE b", "WARNING c", "INFO d", "CONFIG e", "FINE f", "FINER g",
                "FINEST h"
            ]
        );
    }

    #[test]
    fn off_is_never_loggable() {
        let manager = LogManager::new();
        let logger = manager.get_logger("app");
        assert!(!logger.is_loggable(&Level::OFF));

        logger.set_level(Some(Level::OFF));
        assert!(!logger.is_loggable(&Level::SHOUT));
        assert!(!logger.is_loggable(&Level::new("MAXED", u32::MAX - 1)));
    }

    #[test]
    fn clearing_level_restores_inheritance() {
        let manager = LogManager::new();
        let parent = manager.get_logger("svc");
        let child = manager.get_logger("svc.db");
        parent.set_level(Some(Level::WARNING));
        child.set_level(Some(Level::FINE));
        assert_eq!(child.effective_level(), Level::FINE);

        child.set_level(None);
        assert_eq!(child.level(), None);
        assert_eq!(child.effective_level(), Level::WARNING);
    }

    #[test]
    fn handles_from_different_managers_differ() {
        let first = LogManager::new();
        let second = LogManager::new();
        assert_ne!(first.get_logger("a"), second.get_logger("a"));
        assert_eq!(first.get_logger("a"), first.get_logger("a"));
    }

    #[test]
    fn log_record_keeps_caller_fields() {
        let manager = LogManager::new();
        let logger = manager.get_logger("batch");
        let (handler, seen) = recorder();
        logger.add_handler(handler);

        let record = LogRecord::new(Level::INFO, "replayed", "elsewhere", 99);
        assert_eq!(logger.log_record(&record), 1);

        logger.set_level(Some(Level::SEVERE));
        assert_eq!(logger.log_record(&record), 0);
        assert_eq!(*seen.lock().unwrap(), vec!["INFO replayed"]);
    }

    #[test]
    fn root_has_no_parent() {
        let manager = LogManager::new();
        let root = manager.root();
        assert!(root.is_root());
        assert!(root.parent().is_none());
        assert_eq!(root.name(), "");
        assert_eq!(manager.get_logger(""), root);
    }

    #[test]
    fn debug_output_names_logger() {
        let manager = LogManager::new();
        let debug = format!("{:?}", manager.get_logger("net.http"));
        assert!(debug.contains("net.http"));
    }
}
