//! Core resolution types and traits.
//!
//! This module defines the `Resolve` trait and supporting types that form
//! the foundation of the provider abstraction layer.

use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::host::Host;
use std::{fmt, future::Future, pin::Pin, sync::Arc};

/// A search identifier to resolve into host records.
///
/// This is a lightweight wrapper around the caller-supplied string. The
/// identifier is provider-interpreted: depending on the provider's policy
/// it may be matched as an exact tag value, an instance ID, a private IP,
/// or a name prefix.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Query {
    pattern: Box<str>,
}

impl Query {
    /// Creates a new [`Query`] from any string-like type.
    #[inline]
    pub fn new(pattern: impl Into<Box<str>>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// View the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// True for the empty identifier, which prefix-filtering providers
    /// treat as "no filtering, return everything".
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// True for the `"*"` wildcard, which prefix-filtering providers
    /// treat the same way as the empty identifier.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        &*self.pattern == "*"
    }

    /// Prefix-filter test used by enumerating providers: keeps `name`
    /// when the query is empty, the wildcard, or a prefix of `name`.
    pub fn selects(&self, name: &str) -> bool {
        self.is_empty() || self.is_wildcard() || name.starts_with(self.as_str())
    }
}

impl From<&str> for Query {
    fn from(value: &str) -> Self {
        Query::new(value)
    }
}

impl From<String> for Query {
    fn from(value: String) -> Self {
        Query::new(value)
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.pattern, f)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.pattern, f)
    }
}

/// Alias for the `Future` type returned by a provider resolver.
pub type Resolving = Pin<Box<dyn Future<Output = Result<Vec<Host>, ResolveError>> + Send>>;

/// Trait for provider resolution.
///
/// This is the core abstraction every provider-specific resolver
/// implements. Implementations must be thread-safe: the dispatcher calls
/// all registered resolvers concurrently with a shared configuration.
///
/// # Design Notes
///
/// - An empty host list means "not found" and is not an error.
/// - Errors are reserved for backend failures and missing or malformed
///   provider configuration.
/// - Implementations must not panic; unexpected response shapes surface
///   as [`ResolveError::MalformedResponse`].
/// - Uses `&self` for concurrent resolution without mutable access and
///   returns boxed futures for trait object compatibility.
pub trait Resolve: Send + Sync {
    /// Resolves a search identifier into zero or more host records.
    fn resolve(&self, query: Query, config: Arc<ResolverConfig>) -> Resolving;
}

/// Blanket implementation for Arc-wrapped resolvers.
impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, query: Query, config: Arc<ResolverConfig>) -> Resolving {
        (**self).resolve(query, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_from_str() {
        let query = Query::from("web-1");
        assert_eq!(query.as_str(), "web-1");
        assert_eq!(query.to_string(), "web-1");
    }

    #[test]
    fn test_query_from_string() {
        let raw = String::from("i-0123456789abcdef0");
        let query = Query::from(raw);
        assert_eq!(query.as_str(), "i-0123456789abcdef0");
    }

    #[test]
    fn test_wildcard_and_empty() {
        assert!(Query::new("*").is_wildcard());
        assert!(!Query::new("*").is_empty());
        assert!(Query::new("").is_empty());
        assert!(!Query::new("web").is_wildcard());
    }

    #[test]
    fn test_selects_prefix_semantics() {
        let query = Query::new("web");
        assert!(query.selects("web-1"));
        assert!(query.selects("web"));
        assert!(!query.selects("db-1"));

        // Empty and wildcard keep everything.
        assert!(Query::new("").selects("anything"));
        assert!(Query::new("*").selects("anything"));
    }

    #[test]
    fn test_query_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Query::new("web-1"));
        set.insert(Query::new("web-1")); // Duplicate

        assert_eq!(set.len(), 1);
    }
}
