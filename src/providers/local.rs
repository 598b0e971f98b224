//! Local resolver: static loopback fixture.
//!
//! Makes no provider call; always answers with one record describing the
//! local machine. Useful as a no-network fallback and as a provider for
//! testing the dispatch path.

use crate::config::ResolverConfig;
use crate::host::Host;
use crate::resolver::{Query, Resolve, Resolving};
use std::sync::Arc;

const PROVIDER: &str = "local";

/// Resolver that always returns the loopback host. The identifier and
/// configuration are accepted but ignored.
#[derive(Clone, Debug, Default)]
pub struct LocalResolver;

impl Resolve for LocalResolver {
    fn resolve(&self, _query: Query, _config: Arc<ResolverConfig>) -> Resolving {
        tracing::debug!(provider = PROVIDER, "starting resolution");
        let host = Host {
            provider: PROVIDER.into(),
            region: PROVIDER.into(),
            zone: PROVIDER.into(),
            private_ipv4: "127.0.0.1".into(),
            public_ipv4: "127.0.0.1".into(),
            private_ipv6: "::1".into(),
            public_ipv6: "::1".into(),
            private_name: "localhost".into(),
            public_name: "localhost".into(),
            private: "localhost".into(),
            public: "localhost".into(),
            ..Host::default()
        };
        Box::pin(async move { Ok(vec![host]) })
    }
}
