//! Runtime registry of builders for extension headers.
//!
//! Extension headers that have no dedicated grammar rule are looked up here by
//! lowercased name before falling back to [`OpaqueHeader`](crate::types::headers::OpaqueHeader).
//! A process-wide default registry backs [`register_parser`] and
//! [`unregister_parser`]; a [`HeaderParser`](super::HeaderParser) can carry its
//! own instead.

use std::fmt;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use tracing::debug;

use super::syntax::NodeRef;
use crate::types::headers::TypedHeader;

/// Builder turning an `extension-header` node into a typed header
///
/// Returning `None` makes the caller fall back to the opaque header.
pub type BuilderFn = dyn Fn(NodeRef<'_>) -> Option<TypedHeader> + Send + Sync;

/// Global default registry
static DEFAULT_REGISTRY: OnceLock<Arc<ParserRegistry>> = OnceLock::new();

/// Concurrent map from lowercased header name to builder
#[derive(Default)]
pub struct ParserRegistry {
    builders: DashMap<String, Arc<BuilderFn>>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry
    pub fn global() -> Arc<ParserRegistry> {
        DEFAULT_REGISTRY
            .get_or_init(|| Arc::new(ParserRegistry::new()))
            .clone()
    }

    /// Registers `builder` for `name`, replacing any previous one
    pub fn register<F>(&self, name: &str, builder: F)
    where
        F: Fn(NodeRef<'_>) -> Option<TypedHeader> + Send + Sync + 'static,
    {
        let key = name.to_ascii_lowercase();
        let replaced = self.builders.insert(key.clone(), Arc::new(builder)).is_some();
        debug!(header = %key, replaced, "registered header parser");
    }

    /// Removes the builder for `name`; returns whether one was registered
    pub fn unregister(&self, name: &str) -> bool {
        let key = name.to_ascii_lowercase();
        let removed = self.builders.remove(&key).is_some();
        debug!(header = %key, removed, "unregistered header parser");
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(&name.to_ascii_lowercase())
    }

    /// Builder registered for `name`
    ///
    /// The shard lock is released before returning, so the builder may itself
    /// touch the registry.
    pub fn lookup(&self, name: &str) -> Option<Arc<BuilderFn>> {
        self.builders
            .get(&name.to_ascii_lowercase())
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.builders.iter().map(|e| e.key().clone()).collect();
        names.sort();
        f.debug_struct("ParserRegistry")
            .field("builders", &names)
            .finish()
    }
}

/// Registers a builder for `name` in the default registry
///
/// ```rust
/// use rvoip_sip_headers::parser::{register_parser, unregister_parser};
/// use rvoip_sip_headers::types::{headers::TypedHeader, Text};
///
/// register_parser("X-Doc-Example", |node| {
///     Some(TypedHeader::Subject(Text::new(node.child_text("header-value")?)))
/// });
/// assert!(unregister_parser("x-doc-example"));
/// ```
pub fn register_parser<F>(name: &str, builder: F)
where
    F: Fn(NodeRef<'_>) -> Option<TypedHeader> + Send + Sync + 'static,
{
    ParserRegistry::global().register(name, builder);
}

/// Removes a builder from the default registry
pub fn unregister_parser(name: &str) -> bool {
    ParserRegistry::global().unregister(name)
}
