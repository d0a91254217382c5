//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the logger hierarchy.
//!
//! [`HierarchyLayer`] is a tracing-subscriber layer that turns tracing events
//! into records on the logger named after the event's target. Module paths map
//! onto dotted names (`app::net::http` becomes `app.net.http`), so thresholds
//! and handlers configured on `app.net` apply to events emitted anywhere below
//! that module.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use logging::{Level, LogManager, init_tracing};
//!
//! let manager = Arc::new(LogManager::new());
//! manager.get_logger("app.net").set_level(Some(Level::WARNING));
//! init_tracing(Arc::clone(&manager));
//!
//! tracing::warn!(target: "app::net::http", "connection reset");
//! ```

use std::cell::Cell;
use std::fmt::Write as _;
use std::sync::Arc;

use tracing::{Level as TracingLevel, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::level::Level;
use crate::manager::LogManager;

/// Targets owned by this crate. Events on them are never forwarded, so a
/// failing handler cannot feed its own failure report back into dispatch.
const INTERNAL_TARGET_PREFIX: &str = "logging::";

thread_local! {
    /// Set while this thread is delivering a forwarded event to handlers.
    static FORWARDING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as forwarding until dropped.
struct ForwardingGuard;

impl ForwardingGuard {
    /// Returns `None` if the thread is already forwarding an event.
    fn enter() -> Option<Self> {
        if FORWARDING.with(Cell::get) {
            None
        } else {
            FORWARDING.with(|flag| flag.set(true));
            Some(Self)
        }
    }
}

impl Drop for ForwardingGuard {
    fn drop(&mut self) {
        FORWARDING.with(|flag| flag.set(false));
    }
}

/// A tracing layer that logs every event through a [`LogManager`].
///
/// Events emitted by handlers while they process a forwarded event are not
/// forwarded again, so a handler that uses `tracing` cannot recurse through
/// the layer. Such events still reach any other layers of the subscriber.
pub struct HierarchyLayer {
    manager: Arc<LogManager>,
}

impl HierarchyLayer {
    /// Creates a layer that forwards into `manager`.
    #[must_use]
    pub const fn new(manager: Arc<LogManager>) -> Self {
        Self { manager }
    }

    /// Registry receiving the forwarded events.
    #[must_use]
    pub fn manager(&self) -> &LogManager {
        &self.manager
    }

    /// Map a tracing target to a dotted logger name.
    fn target_to_logger_name(target: &str) -> String {
        target.replace("::", ".")
    }

    /// Map a tracing level to a logger level.
    const fn tracing_level_to_level(level: &TracingLevel) -> Level {
        match *level {
            TracingLevel::ERROR => Level::SEVERE,
            TracingLevel::WARN => Level::WARNING,
            TracingLevel::INFO => Level::INFO,
            TracingLevel::DEBUG => Level::FINE,
            TracingLevel::TRACE => Level::FINEST,
        }
    }
}

impl<S> Layer<S> for HierarchyLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();
        if target.starts_with(INTERNAL_TARGET_PREFIX) {
            return;
        }

        let logger = self
            .manager
            .get_logger(&Self::target_to_logger_name(target));
        let level = Self::tracing_level_to_level(metadata.level());
        if !logger.is_loggable(&level) {
            return;
        }

        let Some(_guard) = ForwardingGuard::enter() else {
            return;
        };
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        logger.log(level, visitor.finish(), None);
    }
}

/// Visitor that renders the `message` field followed by `key=value` pairs.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields
        } else {
            format!("{} {}", self.message, self.fields)
        }
    }

    fn push_field(&mut self, name: &str, value: &dyn std::fmt::Display) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field.name(), &format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.message);
        } else {
            self.push_field(field.name(), &value);
        }
    }
}

/// Install [`HierarchyLayer`] as the global tracing subscriber.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use logging::{LogManager, init_tracing};
///
/// init_tracing(Arc::new(LogManager::new()));
/// tracing::info!(target: "app::startup", "ready");
/// ```
pub fn init_tracing(manager: Arc<LogManager>) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(HierarchyLayer::new(manager))
        .init();
}

/// Install [`HierarchyLayer`] alongside an additional filter or layer.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use logging::{LogManager, init_tracing_with_filter};
/// use tracing_subscriber::EnvFilter;
///
/// init_tracing_with_filter(Arc::new(LogManager::new()), EnvFilter::from_default_env());
/// ```
pub fn init_tracing_with_filter<F>(manager: Arc<LogManager>, filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(HierarchyLayer::new(manager))
        .init();
}
