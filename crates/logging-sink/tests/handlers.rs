//! Integration tests for the sink handlers registered on a logger hierarchy.

use std::sync::Arc;

use logging::{HandlerRef, Level, LogManager, Logging};
use logging_sink::{LineMode, MemoryHandler, RecordSink};

// ============================================================================
// RecordSink Tests
// ============================================================================

/// Verifies a sink on an ancestor writes one line per accepted record.
#[test]
fn record_sink_writes_propagated_records() {
    let sink = Arc::new(RecordSink::new(Vec::new()));
    let manager = LogManager::new();
    manager.get_logger("svc").set_level(Some(Level::INFO));
    manager
        .get_logger("svc")
        .add_handler(Arc::clone(&sink) as HandlerRef);

    let logger = manager.get_logger("svc.db");
    logger.info("connected");
    logger.fine("hidden");
    logger.severe_with("lost", Arc::new(std::io::Error::other("reset by peer")));
    drop(manager);

    let sink = Arc::into_inner(sink).expect("sole owner");
    let output = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(" INFO [svc.db] connected"));
    assert!(lines[1].ends_with(" SEVERE [svc.db] lost: reset by peer"));
}

/// Verifies the line mode can be changed while the sink is registered.
#[test]
fn line_mode_changes_while_shared() {
    let sink = Arc::new(RecordSink::new(Vec::new()));
    let manager = LogManager::new();
    manager.root().add_handler(Arc::clone(&sink) as HandlerRef);

    sink.set_line_mode(LineMode::WithoutNewline);
    manager.get_logger("p").info("progress");
    drop(manager);

    let buffer = Arc::into_inner(sink).expect("sole owner").into_inner();
    assert!(buffer.ends_with(b"[p] progress"));
}

// ============================================================================
// MemoryHandler Tests
// ============================================================================

/// Verifies handlers on self and parent each receive the record once.
#[test]
fn memory_handlers_observe_propagation_order() {
    let child_memory = Arc::new(MemoryHandler::new());
    let parent_memory = Arc::new(MemoryHandler::new());
    let manager = LogManager::new();
    manager
        .get_logger("a")
        .add_handler(Arc::clone(&parent_memory) as HandlerRef);
    manager
        .get_logger("a.b")
        .add_handler(Arc::clone(&child_memory) as HandlerRef);

    manager.get_logger("a.b").severe("boom");

    let child = child_memory.drain();
    let parent = parent_memory.drain();
    assert_eq!(child.len(), 1);
    assert_eq!(parent.len(), 1);
    assert_eq!(child[0].sequence_number(), parent[0].sequence_number());
}

/// Verifies the facade stops feeding a memory handler once disabled.
#[test]
fn facade_disable_stops_capture() {
    let memory = Arc::new(MemoryHandler::new());
    let logging = Logging::default();
    let logger = logging.get_logger("ui", None);
    logging.add_handler(logger.as_ref(), Arc::clone(&memory) as HandlerRef);

    logging.warning(logger.as_ref(), "shown", None);
    logging.set_enabled(false);
    logging.warning(logger.as_ref(), "suppressed", None);

    assert_eq!(memory.messages(), vec!["shown"]);
}

/// Verifies removal by identity works for shared handler types.
#[test]
fn remove_memory_handler_by_identity() {
    let memory = Arc::new(MemoryHandler::new());
    let handler: HandlerRef = memory.clone();
    let manager = LogManager::new();
    let logger = manager.get_logger("r");
    logger.add_handler(Arc::clone(&handler));

    assert!(logger.remove_handler(&handler));
    logger.info("ignored");
    assert!(memory.is_empty());
}
