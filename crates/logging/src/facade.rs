//! crates/logging/src/facade.rs
//! Guarded entry points over a [`LogManager`].
//!
//! Every function checks the enabled flag first. While logging is disabled the
//! facade hands out no loggers, `remove_handler` reports `false`, and every
//! other call does nothing. A `None` logger argument is likewise a no-op, so
//! call sites can thread the result of [`Logging::get_logger`] straight
//! through without checking it. Loggers obtained from a different registry
//! are treated the same way as `None`.

use std::ptr;
use std::sync::OnceLock;

use crate::config::LoggingConfig;
use crate::handler::HandlerRef;
use crate::level::Level;
use crate::logger::Logger;
use crate::manager::LogManager;
use crate::record::ErrorRef;

/// Enabled-gated facade owning a logger registry.
///
/// # Examples
///
/// ```
/// use logging::{Level, Logging, LoggingConfig, handler_fn};
///
/// let logging = Logging::default();
/// let logger = logging.get_logger("app.ui", Some(Level::INFO));
/// logging.add_handler(logger.as_ref(), handler_fn(|record| {
///     assert_eq!(record.message(), "window opened");
///     Ok(())
/// }));
/// logging.info(logger.as_ref(), "window opened", None);
///
/// let off = Logging::new(&LoggingConfig::disabled());
/// assert!(off.get_logger("app.ui", None).is_none());
/// ```
#[derive(Debug, Default)]
pub struct Logging {
    manager: LogManager,
}

impl Logging {
    /// Creates a facade over a fresh registry configured from `config`.
    #[must_use]
    pub fn new(config: &LoggingConfig) -> Self {
        Self::with_manager(LogManager::from_config(config))
    }

    /// Wraps an existing registry.
    #[must_use]
    pub const fn with_manager(manager: LogManager) -> Self {
        Self { manager }
    }

    /// Underlying registry.
    #[must_use]
    pub const fn manager(&self) -> &LogManager {
        &self.manager
    }

    /// Reports whether logging is enabled.
    pub fn is_enabled(&self) -> bool {
        self.manager.is_enabled()
    }

    /// Switches logging on or off at runtime.
    pub fn set_enabled(&self, enabled: bool) {
        self.manager.set_enabled(enabled);
    }

    /// Returns the named logger, creating it if needed, or `None` when
    /// logging is disabled.
    ///
    /// When `level` is supplied it replaces the logger's explicit threshold.
    pub fn get_logger(&self, name: &str, level: Option<Level>) -> Option<Logger<'_>> {
        if !self.is_enabled() {
            return None;
        }
        let logger = self.manager.get_logger(name);
        if let Some(level) = level {
            logger.set_level(Some(level));
        }
        Some(logger)
    }

    /// Registers `handler` on `logger`.
    pub fn add_handler(&self, logger: Option<&Logger<'_>>, handler: HandlerRef) {
        if let Some(logger) = self.enabled_logger(logger) {
            logger.add_handler(handler);
        }
    }

    /// Unregisters `handler` from `logger`. Returns whether it was removed.
    pub fn remove_handler(&self, logger: Option<&Logger<'_>>, handler: &HandlerRef) -> bool {
        self.enabled_logger(logger)
            .is_some_and(|logger| logger.remove_handler(handler))
    }

    /// Logs `message` at `level`.
    pub fn log(
        &self,
        logger: Option<&Logger<'_>>,
        level: Level,
        message: impl Into<String>,
        exception: Option<ErrorRef>,
    ) {
        if let Some(logger) = self.enabled_logger(logger) {
            logger.log(level, message, exception);
        }
    }

    /// Logs `message` at [`Level::SEVERE`].
    pub fn error(
        &self,
        logger: Option<&Logger<'_>>,
        message: impl Into<String>,
        exception: Option<ErrorRef>,
    ) {
        self.log(logger, Level::SEVERE, message, exception);
    }

    /// Logs `message` at [`Level::WARNING`].
    pub fn warning(
        &self,
        logger: Option<&Logger<'_>>,
        message: impl Into<String>,
        exception: Option<ErrorRef>,
    ) {
        self.log(logger, Level::WARNING, message, exception);
    }

    /// Logs `message` at [`Level::INFO`].
    pub fn info(
        &self,
        logger: Option<&Logger<'_>>,
        message: impl Into<String>,
        exception: Option<ErrorRef>,
    ) {
        self.log(logger, Level::INFO, message, exception);
    }

    /// Logs `message` at [`Level::FINE`].
    pub fn fine(
        &self,
        logger: Option<&Logger<'_>>,
        message: impl Into<String>,
        exception: Option<ErrorRef>,
    ) {
        self.log(logger, Level::FINE, message, exception);
    }

    /// Passes `logger` through only while enabled and only if it belongs to
    /// this facade's registry.
    fn enabled_logger<'l, 'm>(&self, logger: Option<&'l Logger<'m>>) -> Option<&'l Logger<'m>> {
        if !self.is_enabled() {
            return None;
        }
        logger.filter(|logger| ptr::eq(logger.manager(), &self.manager))
    }
}

/// Process-wide facade, created from [`LoggingConfig::from_env`] on first use.
///
/// An invalid environment configuration is reported once through `tracing`
/// and replaced by the default configuration. The instance lives for the rest
/// of the process.
pub fn global() -> &'static Logging {
    static GLOBAL: OnceLock<Logging> = OnceLock::new();
    GLOBAL.get_or_init(|| {
        let config = LoggingConfig::from_env().unwrap_or_else(|error| {
            tracing::warn!(
                target: "logging::config",
                %error,
                "ignoring invalid logging environment"
            );
            LoggingConfig::default()
        });
        Logging::new(&config)
    })
}
