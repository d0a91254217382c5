//! crates/logging/src/manager.rs
//! Registry owning every logger node of a hierarchy.
//!
//! Loggers live in an arena indexed by [`LoggerId`]. Each node stores the id of
//! its parent, so the tree never holds owning back-references. The arena is
//! guarded by a [`RwLock`]: lookups of existing names and dispatch take the read
//! lock, creation and mutation take the write lock. Handlers are cloned out of
//! the arena before they run, which lets a handler log or register loggers
//! without deadlocking.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rustc_hash::FxHashMap;

use crate::config::LoggingConfig;
use crate::handler::{DISPATCH_TARGET, HandlerRef, publish_isolated};
use crate::level::Level;
use crate::logger::Logger;
use crate::record::{ErrorRef, LogRecord};

/// Threshold used when neither a logger nor any of its ancestors sets a level.
pub const DEFAULT_LEVEL: Level = Level::ALL;

/// Index of a logger inside its [`LogManager`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct LoggerId(usize);

impl LoggerId {
    /// The root logger, whose name is the empty string.
    pub const ROOT: Self = Self(0);

    /// Returns the arena slot backing this id.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

struct Node {
    name: String,
    level: Option<Level>,
    handlers: Vec<HandlerRef>,
    parent: Option<LoggerId>,
    children: Vec<LoggerId>,
}

impl Node {
    fn new(name: String, parent: Option<LoggerId>) -> Self {
        Self {
            name,
            level: None,
            handlers: Vec::new(),
            parent,
            children: Vec::new(),
        }
    }
}

struct Arena {
    index: FxHashMap<String, LoggerId>,
    nodes: Vec<Node>,
}

impl Arena {
    fn new() -> Self {
        let mut index = FxHashMap::default();
        index.insert(String::new(), LoggerId::ROOT);
        Self {
            index,
            nodes: vec![Node::new(String::new(), None)],
        }
    }

    fn node(&self, id: LoggerId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: LoggerId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Returns the id for `name`, creating it and any missing ancestors.
    ///
    /// Walks outward to the nearest registered ancestor, then creates the
    /// missing names from the shallowest down. Stack use does not grow with
    /// the number of segments.
    fn materialize(&mut self, name: &str) -> LoggerId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }

        let mut missing = vec![name];
        let mut parent = LoggerId::ROOT;
        let mut cursor = name;
        while let Some((prefix, _)) = cursor.rsplit_once('.') {
            if let Some(&id) = self.index.get(prefix) {
                parent = id;
                break;
            }
            missing.push(prefix);
            cursor = prefix;
        }

        for name in missing.into_iter().rev() {
            parent = self.insert(name, parent);
        }
        parent
    }

    fn insert(&mut self, name: &str, parent: LoggerId) -> LoggerId {
        let id = LoggerId(self.nodes.len());
        self.nodes.push(Node::new(name.to_owned(), Some(parent)));
        self.node_mut(parent).children.push(id);
        self.index.insert(name.to_owned(), id);
        id
    }

    fn effective_level(&self, id: LoggerId) -> Level {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current);
            if let Some(level) = &node.level {
                return level.clone();
            }
            cursor = node.parent;
        }
        DEFAULT_LEVEL
    }

    /// Collects handlers from `id` outward to the root, preserving insertion
    /// order within each logger.
    fn handler_chain(&self, id: LoggerId) -> Vec<HandlerRef> {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current);
            chain.extend(node.handlers.iter().cloned());
            cursor = node.parent;
        }
        chain
    }
}

/// Dotted-namespace registry of loggers.
///
/// Every [`LogManager`] is independent: tests and embedders can build as many
/// as they need. [`crate::global`] provides a lazily created process-wide
/// instance for code that prefers ambient state.
///
/// # Examples
///
/// ```
/// use logging::{Level, LogManager};
///
/// let manager = LogManager::new();
/// let leaf = manager.get_logger("net.http.client");
/// manager.get_logger("net").set_level(Some(Level::WARNING));
///
/// assert_eq!(leaf.effective_level(), Level::WARNING);
/// assert_eq!(leaf.parent().map(|p| p.name()).as_deref(), Some("net.http"));
/// assert!(manager.get_logger("net.http.client") == leaf);
/// ```
pub struct LogManager {
    arena: RwLock<Arena>,
    enabled: AtomicBool,
    sequence: AtomicU64,
}

impl fmt::Debug for LogManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogManager")
            .field("loggers", &self.logger_count())
            .field("enabled", &self.is_enabled())
            .finish_non_exhaustive()
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LogManager {
    /// Creates an enabled registry containing only the root logger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            arena: RwLock::new(Arena::new()),
            enabled: AtomicBool::new(true),
            sequence: AtomicU64::new(0),
        }
    }

    /// Creates a registry and applies `config` to it.
    #[must_use]
    pub fn from_config(config: &LoggingConfig) -> Self {
        let manager = Self::new();
        manager.apply_config(config);
        manager
    }

    /// Applies the enabled flag, root level and per-logger directives of `config`.
    ///
    /// Directives are applied in order, so a later directive for the same
    /// logger wins.
    pub fn apply_config(&self, config: &LoggingConfig) {
        self.set_enabled(config.enabled);
        if let Some(level) = &config.root_level {
            self.root().set_level(Some(level.clone()));
        }
        for directive in &config.directives {
            self.get_logger(&directive.logger)
                .set_level(directive.level.clone());
        }
        tracing::debug!(
            target: "logging::config",
            enabled = config.enabled,
            directives = config.directives.len(),
            "applied logging configuration"
        );
    }

    /// Reports whether records may be emitted at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Turns every logger of this registry on or off.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Returns the root logger.
    pub fn root(&self) -> Logger<'_> {
        Logger::new(self, LoggerId::ROOT)
    }

    /// Returns the logger for `name`, creating it and any missing ancestors.
    ///
    /// Repeated calls with the same name return handles to the same node, so a
    /// level or handler set through one handle is visible through all of them.
    /// The empty name addresses the root logger.
    pub fn get_logger(&self, name: &str) -> Logger<'_> {
        if let Some(&id) = self.read().index.get(name) {
            return Logger::new(self, id);
        }
        let id = self.write().materialize(name);
        Logger::new(self, id)
    }

    /// Looks up an existing logger without creating it.
    pub fn find(&self, name: &str) -> Option<Logger<'_>> {
        self.read()
            .index
            .get(name)
            .map(|&id| Logger::new(self, id))
    }

    /// Returns every registered logger name in lexical order, root first.
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().index.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered loggers, including the root.
    pub fn logger_count(&self) -> usize {
        self.read().nodes.len()
    }

    pub(crate) fn name_of(&self, id: LoggerId) -> String {
        self.read().node(id).name.clone()
    }

    pub(crate) fn parent_of(&self, id: LoggerId) -> Option<LoggerId> {
        self.read().node(id).parent
    }

    pub(crate) fn children_of(&self, id: LoggerId) -> Vec<LoggerId> {
        self.read().node(id).children.clone()
    }

    pub(crate) fn level_of(&self, id: LoggerId) -> Option<Level> {
        self.read().node(id).level.clone()
    }

    pub(crate) fn set_level_of(&self, id: LoggerId, level: Option<Level>) {
        self.write().node_mut(id).level = level;
    }

    pub(crate) fn effective_level_of(&self, id: LoggerId) -> Level {
        self.read().effective_level(id)
    }

    pub(crate) fn is_loggable(&self, id: LoggerId, level: &Level) -> bool {
        self.is_enabled() && !level.is_off() && level.value() >= self.effective_level_of(id).value()
    }

    pub(crate) fn add_handler_to(&self, id: LoggerId, handler: HandlerRef) {
        self.write().node_mut(id).handlers.push(handler);
    }

    pub(crate) fn remove_handler_from(&self, id: LoggerId, handler: &HandlerRef) -> bool {
        let mut arena = self.write();
        let handlers = &mut arena.node_mut(id).handlers;
        match handlers.iter().position(|h| Arc::ptr_eq(h, handler)) {
            Some(position) => {
                handlers.remove(position);
                true
            }
            None => false,
        }
    }

    pub(crate) fn handler_count_of(&self, id: LoggerId) -> usize {
        self.read().node(id).handlers.len()
    }

    /// Builds and dispatches a record if `level` passes the logger's threshold.
    pub(crate) fn log_at(
        &self,
        id: LoggerId,
        level: Level,
        message: impl Into<String>,
        exception: Option<ErrorRef>,
    ) {
        if !self.is_loggable(id, &level) {
            return;
        }

        let record = LogRecord::new(level, message, self.name_of(id), self.next_sequence())
            .with_exception(exception);
        self.dispatch(id, &record);
    }

    /// Delivers `record` to the handlers of `id` and each of its ancestors.
    ///
    /// Returns the number of handlers that completed without error.
    pub(crate) fn dispatch(&self, id: LoggerId, record: &LogRecord) -> usize {
        let chain = self.read().handler_chain(id);
        let delivered = chain
            .iter()
            .filter(|handler| publish_isolated(handler, record))
            .count();

        if delivered < chain.len() {
            tracing::trace!(
                target: DISPATCH_TARGET,
                failed = chain.len() - delivered,
                total = chain.len(),
                "record dispatched with handler failures"
            );
        }
        delivered
    }

    pub(crate) fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }

    fn read(&self) -> RwLockReadGuard<'_, Arena> {
        self.arena.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arena> {
        self.arena.write().unwrap_or_else(PoisonError::into_inner)
    }
}
