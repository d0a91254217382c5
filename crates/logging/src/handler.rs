//! crates/logging/src/handler.rs
//! Handler contract and isolated dispatch.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::HandlerError;
use crate::record::LogRecord;

/// Target used for diagnostics about the logging machinery itself.
pub(crate) const DISPATCH_TARGET: &str = "logging::dispatch";

/// Receives accepted records.
///
/// Handlers are registered on a [`Logger`](crate::Logger) and invoked for
/// every record accepted by that logger or any of its descendants. A failing
/// handler never affects the caller or the handlers after it.
///
/// Closures of the shape `Fn(&LogRecord) -> Result<(), HandlerError>` implement
/// the trait directly; [`handler_fn`] wraps one into a [`HandlerRef`]:
///
/// ```
/// use logging::handler_fn;
///
/// let handler = handler_fn(|record| {
///     println!("{}: {}", record.level(), record.message());
///     Ok(())
/// });
/// # let _ = handler;
/// ```
pub trait Handler: Send + Sync {
    /// Publishes a single record.
    fn publish(&self, record: &LogRecord) -> Result<(), HandlerError>;
}

impl<F> Handler for F
where
    F: Fn(&LogRecord) -> Result<(), HandlerError> + Send + Sync,
{
    fn publish(&self, record: &LogRecord) -> Result<(), HandlerError> {
        self(record)
    }
}

/// Shared handler reference. Registration and removal use pointer identity.
pub type HandlerRef = Arc<dyn Handler>;

/// Wraps a closure into a [`HandlerRef`].
///
/// Keep the returned reference if the handler will be removed later; a second
/// call with an identical closure produces a distinct handler.
pub fn handler_fn<F>(f: F) -> HandlerRef
where
    F: Fn(&LogRecord) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Invokes `handler`, converting both errors and panics into a logged warning.
///
/// Returns `true` when the handler completed successfully.
pub(crate) fn publish_isolated(handler: &HandlerRef, record: &LogRecord) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(|| handler.publish(record))) {
        Ok(Ok(())) => true,
        Ok(Err(error)) => {
            tracing::warn!(
                target: DISPATCH_TARGET,
                logger = record.logger_name(),
                level = record.level().name(),
                %error,
                "log handler failed"
            );
            false
        }
        Err(payload) => {
            tracing::warn!(
                target: DISPATCH_TARGET,
                logger = record.logger_name(),
                level = record.level().name(),
                panic = panic_message(payload.as_ref()),
                "log handler panicked"
            );
            false
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use std::sync::Mutex;

    fn record() -> LogRecord {
        LogRecord::new(Level::INFO, "hello", "app", 0)
    }

    #[test]
    fn closure_handler_receives_record() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handler = handler_fn(move |record| {
            sink.lock().unwrap().push(record.message().to_owned());
            Ok(())
        });

        assert!(publish_isolated(&handler, &record()));
        assert_eq!(*seen.lock().unwrap(), vec!["hello".to_owned()]);
    }

    #[test]
    fn failing_handler_is_contained() {
        let handler = handler_fn(|_| Err(HandlerError::failed("disk full")));
        assert!(!publish_isolated(&handler, &record()));
    }

    #[test]
    fn panicking_handler_is_contained() {
        let handler = handler_fn(|_| panic!("handler exploded"));
        assert!(!publish_isolated(&handler, &record()));
    }

    #[test]
    fn panic_message_extracts_payloads() {
        let static_payload: Box<dyn Any + Send> = Box::new("static");
        let owned_payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let other_payload: Box<dyn Any + Send> = Box::new(42_u8);

        assert_eq!(panic_message(static_payload.as_ref()), "static");
        assert_eq!(panic_message(owned_payload.as_ref()), "owned");
        assert_eq!(panic_message(other_payload.as_ref()), "non-string panic payload");
    }
}
