#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides ready-made [`Handler`](logging::Handler)
//! implementations for the `logging` crate's logger hierarchy:
//!
//! - [`RecordSink`] renders each record as a line of text and writes it to any
//!   [`std::io::Write`] implementor, such as standard error or a file.
//! - [`MemoryHandler`] keeps cloned records for later inspection.
//!
//! # Design
//!
//! Handlers are shared through `Arc` and may be invoked from several threads,
//! so both types guard their state with a mutex and take `&self` everywhere.
//! Rendering is factored into [`render_record`] so custom handlers can reuse
//! the same layout. Callers control whether rendered records end with a
//! newline by selecting a [`LineMode`].
//!
//! # Invariants
//!
//! - A record is written with one `write_all` call while the sink's lock is
//!   held, so concurrent records never interleave within a line.
//! - `LineMode::WithNewline` is the default and places each record on its own
//!   line.
//!
//! # Errors
//!
//! Writer failures are returned from [`logging::Handler::publish`] as
//! [`logging::HandlerError::Io`]; the dispatching logger reports them and
//! continues with the next handler.
//!
//! # Examples
//!
//! Capture records in memory and inspect them:
//!
//! ```
//! use std::sync::Arc;
//! use logging::{HandlerRef, Level, LogManager};
//! use logging_sink::MemoryHandler;
//!
//! let memory = Arc::new(MemoryHandler::new());
//! let manager = LogManager::new();
//! manager.get_logger("app").set_level(Some(Level::INFO));
//! manager.get_logger("app").add_handler(Arc::clone(&memory) as HandlerRef);
//!
//! manager.get_logger("app.ui").info("window opened");
//! manager.get_logger("app.ui").fine("repaint");
//!
//! assert_eq!(memory.messages(), vec!["window opened"]);
//! ```
//!
//! # See also
//!
//! - `logging` crate for levels, loggers and the enabled-gated facade.

mod line_mode;
mod sink;

pub use line_mode::LineMode;
pub use sink::{MemoryHandler, RecordSink, render_record};
