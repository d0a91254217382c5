#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` provides hierarchical severity-level loggers. Loggers are named
//! with dotted paths (`net.http.client`) and arranged in a tree rooted at the
//! logger with the empty name. Each logger may carry its own [`Level`]
//! threshold and a list of [`Handler`]s.
//!
//! # Design
//!
//! - [`LogManager`] owns every logger in an arena and hands out borrowed
//!   [`Logger`] handles. Asking for `a.b.c` creates `a` and `a.b` as well.
//! - A logger's [effective level](Logger::effective_level) is its own level or
//!   the nearest ancestor's, falling back to [`DEFAULT_LEVEL`].
//! - An accepted call builds one [`LogRecord`] and delivers it to the
//!   handlers of the originating logger, then to those of each ancestor up to
//!   the root.
//! - [`Logging`] is the guarded facade: when the enabled flag is off it hands
//!   out no loggers and ignores every call.
//!
//! # Invariants
//!
//! - Repeated lookups of one name address the same node.
//! - [`Level::OFF`] is never loggable, and as a threshold silences a logger.
//! - A handler that fails or panics is reported through `tracing` on the
//!   `logging::dispatch` target and does not stop delivery to later handlers.
//!
//! # Examples
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use logging::{Level, LogManager, handler_fn};
//!
//! let manager = LogManager::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//!
//! manager.get_logger("db").set_level(Some(Level::WARNING));
//! manager.get_logger("db").add_handler(handler_fn(move |record| {
//!     sink.lock().unwrap().push(record.message().to_owned());
//!     Ok(())
//! }));
//!
//! let pool = manager.get_logger("db.pool");
//! pool.info("checked out connection");
//! pool.severe("pool exhausted");
//!
//! assert_eq!(*seen.lock().unwrap(), vec!["pool exhausted".to_owned()]);
//! ```
//!
//! # See also
//!
//! - `logging-sink` for handlers that write records to streams or collect
//!   them in memory.

mod config;
mod error;
mod facade;
mod handler;
mod level;
mod logger;
mod manager;
mod record;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::{ENABLED_ENV_VAR, LEVELS_ENV_VAR, LevelDirective, LoggingConfig};
pub use error::{ConfigError, HandlerError, LevelParseError};
pub use facade::{Logging, global};
pub use handler::{Handler, HandlerRef, handler_fn};
pub use level::{Level, PREDEFINED_LEVELS};
pub use logger::Logger;
pub use manager::{DEFAULT_LEVEL, LogManager, LoggerId};
pub use record::{ErrorRef, LogRecord};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{HierarchyLayer, init_tracing, init_tracing_with_filter};
