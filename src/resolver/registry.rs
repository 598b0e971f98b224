//! Explicit provider registry.
//!
//! The registry maps provider names to resolver instances. It is built
//! once during process start by an explicit bootstrap routine (see
//! [`crate::providers::bootstrap`]) and read-only thereafter: dispatch
//! iterates it, nothing mutates it. There is deliberately no interior
//! locking and no self-registration through global state.

use super::resolve::Resolve;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Mapping from provider name to its resolver instance.
#[derive(Default)]
pub struct Registry {
    entries: HashMap<String, Arc<dyn Resolve>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Registry::default()
    }

    /// Inserts or replaces the resolver registered under `name`.
    ///
    /// Registration is idempotent per name: the last registration wins.
    pub fn register(&mut self, name: impl Into<String>, resolver: Arc<dyn Resolve>) {
        self.entries.insert(name.into(), resolver);
    }

    /// The resolver registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Resolve>> {
        self.entries.get(name)
    }

    /// Iterates all `(name, resolver)` pairs in unspecified order.
    pub fn resolvers(&self) -> impl Iterator<Item = (&str, &Arc<dyn Resolve>)> {
        self.entries.iter().map(|(name, r)| (name.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Registry").field("providers", &names).finish()
    }
}
