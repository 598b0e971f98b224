//! Error types for provider resolution.
//!
//! "Not found" is never an error in this crate: a provider that has no
//! matching instance returns an empty host list. `ResolveError` covers the
//! remaining failure classes: backend calls that fail outright, responses
//! that cannot be interpreted, and missing or malformed provider
//! configuration.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Opaque error produced by a provider backend implementation.
///
/// Backends wrap authenticated SDK clients, so their failures (auth,
/// network, API errors) arrive as whatever error type the wrapped client
/// produces. `Arc` keeps the error cloneable alongside the result that
/// carries it.
pub type BackendError = Arc<dyn std::error::Error + Send + Sync>;

/// Error scoped to a single provider's resolution call.
///
/// A failing provider never aborts the aggregate dispatch; its error rides
/// in that provider's slot of the result and siblings complete normally.
#[derive(Debug, Error, Clone)]
pub enum ResolveError {
    /// The provider's backend call itself failed (authentication, network,
    /// API error).
    #[error("{provider} backend call failed: {source}")]
    Backend {
        provider: &'static str,
        #[source]
        source: BackendError,
    },

    /// The backend answered, but the response shape could not be
    /// interpreted.
    #[error("{provider} returned a malformed response: {detail}")]
    MalformedResponse {
        provider: &'static str,
        detail: String,
    },

    /// A provider that requires configuration was dispatched without it.
    #[error("missing configuration key `{key}` for provider {provider}")]
    MissingConfig {
        provider: &'static str,
        key: &'static str,
    },

    /// The provider's configuration section exists but does not
    /// deserialize into the expected shape.
    #[error("invalid configuration section for provider {provider}: {source}")]
    InvalidConfig {
        provider: &'static str,
        #[source]
        source: Arc<serde_json::Error>,
    },

    /// The dispatcher's per-call deadline elapsed before the provider
    /// answered. Only produced when a timeout is configured.
    #[error("provider {provider} timed out after {elapsed:?}")]
    Timeout { provider: String, elapsed: Duration },
}

impl ResolveError {
    /// Wraps a backend failure with the provider it belongs to.
    pub fn backend(
        provider: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ResolveError::Backend {
            provider,
            source: Arc::new(source),
        }
    }

    /// True when the failure is a configuration problem rather than a
    /// backend one.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ResolveError::MissingConfig { .. } | ResolveError::InvalidConfig { .. }
        )
    }
}
