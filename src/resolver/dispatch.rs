//! Concurrent fan-out/fan-in dispatch.
//!
//! The dispatcher runs `resolve` against every registered resolver
//! concurrently and aggregates one result per provider. One provider's
//! failure never blocks or aborts its siblings: a failed provider
//! contributes an empty host list plus its error, and healthy providers
//! always contribute their full results.

use super::registry::Registry;
use super::resolve::Query;
use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::host::Host;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::Duration;

/// Options controlling one dispatch call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchOptions {
    /// Deadline applied to each provider call individually. `None` lets a
    /// hung backend hold its slot open indefinitely, matching providers
    /// that manage deadlines themselves.
    pub timeout: Option<Duration>,
}

impl DispatchOptions {
    /// Options with a per-provider deadline.
    pub fn with_timeout(timeout: Duration) -> Self {
        DispatchOptions {
            timeout: Some(timeout),
        }
    }
}

/// One provider's contribution to the aggregate result.
#[derive(Debug, Clone)]
pub struct ProviderResult {
    /// Registry name of the provider that produced this entry.
    pub provider: String,
    /// Matched hosts, empty on "not found" and on failure.
    pub hosts: Vec<Host>,
    /// The provider's failure, if it had one. Callers that only care
    /// about reachable hosts can ignore this field.
    pub error: Option<ResolveError>,
}

impl ProviderResult {
    /// True when the provider completed without error.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Dispatches `query` to every registered resolver with no per-call
/// deadline. See [`dispatch_with`].
pub async fn dispatch(
    registry: &Registry,
    query: Query,
    config: Arc<ResolverConfig>,
) -> Vec<ProviderResult> {
    dispatch_with(registry, query, config, DispatchOptions::default()).await
}

/// Dispatches `query` to every registered resolver concurrently and waits
/// for all of them.
///
/// Returns exactly one [`ProviderResult`] per registered provider, in
/// completion order. The order is not deterministic and callers must not
/// rely on it.
pub async fn dispatch_with(
    registry: &Registry,
    query: Query,
    config: Arc<ResolverConfig>,
    options: DispatchOptions,
) -> Vec<ProviderResult> {
    let mut inflight = FuturesUnordered::new();

    for (name, resolver) in registry.resolvers() {
        let provider = name.to_string();
        let call = resolver.resolve(query.clone(), Arc::clone(&config));
        let deadline = options.timeout;

        inflight.push(async move {
            let outcome = match deadline {
                Some(limit) => match tokio::time::timeout(limit, call).await {
                    Ok(result) => result,
                    Err(_) => Err(ResolveError::Timeout {
                        provider: provider.clone(),
                        elapsed: limit,
                    }),
                },
                None => call.await,
            };

            match outcome {
                Ok(hosts) => {
                    tracing::debug!(provider = %provider, count = hosts.len(), "provider resolved");
                    ProviderResult {
                        provider,
                        hosts,
                        error: None,
                    }
                }
                Err(error) => {
                    tracing::debug!(provider = %provider, error = %error, "provider resolution failed");
                    ProviderResult {
                        provider,
                        hosts: Vec::new(),
                        error: Some(error),
                    }
                }
            }
        });
    }

    let mut results = Vec::with_capacity(registry.len());
    while let Some(result) = inflight.next().await {
        results.push(result);
    }
    results
}
