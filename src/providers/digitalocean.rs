//! DigitalOcean resolver: exact-name single-shot lookup.
//!
//! Lists the account's droplets and keeps the one whose name equals the
//! identifier exactly. No prefix or fallback tiers.

use super::BackendCall;
use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::host::Host;
use crate::resolver::{Query, Resolve, Resolving};
use std::sync::Arc;

const PROVIDER: &str = "digitalocean";

/// Raw droplet record. Address fields are empty when the droplet has no
/// network of that class.
#[derive(Debug, Clone, Default)]
pub struct Droplet {
    pub id: u64,
    pub name: String,
    pub region_slug: String,
    pub public_ipv4: String,
    pub private_ipv4: String,
    pub public_ipv6: String,
}

/// Backend seam to the DigitalOcean API.
pub trait DropletApi: Send + Sync {
    /// Every droplet on the account, pagination followed to completion.
    fn list_droplets(&self) -> BackendCall<Vec<Droplet>>;
}

/// Resolver for DigitalOcean droplets.
pub struct DigitalOceanResolver {
    api: Arc<dyn DropletApi>,
}

impl DigitalOceanResolver {
    pub fn new(api: Arc<dyn DropletApi>) -> Self {
        DigitalOceanResolver { api }
    }
}

impl Resolve for DigitalOceanResolver {
    fn resolve(&self, query: Query, _config: Arc<ResolverConfig>) -> Resolving {
        let api = Arc::clone(&self.api);

        Box::pin(async move {
            tracing::debug!(provider = PROVIDER, query = %query, "starting resolution");

            let droplets = api
                .list_droplets()
                .await
                .map_err(|source| ResolveError::Backend {
                    provider: PROVIDER,
                    source,
                })?;

            Ok(droplets
                .into_iter()
                .filter(|d| d.name == query.as_str())
                .map(to_host)
                .collect())
        })
    }
}

fn to_host(droplet: Droplet) -> Host {
    Host {
        provider: PROVIDER.into(),
        region: droplet.region_slug,
        id: droplet.id.to_string(),
        private: droplet.private_ipv4.clone(),
        public: droplet.public_ipv4.clone(),
        private_ipv4: droplet.private_ipv4,
        public_ipv4: droplet.public_ipv4,
        public_ipv6: droplet.public_ipv6,
        ..Host::default()
    }
}
