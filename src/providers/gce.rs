//! GCE resolver: single-shot point lookup.
//!
//! Unlike the enumerating providers, GCE performs exactly one lookup of
//! the named instance in a configured zone; there is no prefix or
//! fallback matching. The zone comes from the `gce` configuration
//! section, the project from the backend's ambient credentials.

use super::BackendCall;
use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::host::Host;
use crate::resolver::{Query, Resolve, Resolving};
use serde::Deserialize;
use std::sync::Arc;

const PROVIDER: &str = "gce";

/// Raw GCE instance record.
#[derive(Debug, Clone, Default)]
pub struct GceInstance {
    /// Numeric instance ID.
    pub id: u64,
    pub network_interfaces: Vec<GceNetworkInterface>,
}

#[derive(Debug, Clone, Default)]
pub struct GceNetworkInterface {
    /// Internal address on the interface's network.
    pub network_ip: String,
    pub access_configs: Vec<GceAccessConfig>,
}

#[derive(Debug, Clone, Default)]
pub struct GceAccessConfig {
    /// External NAT address, when one is attached.
    pub nat_ip: String,
}

/// Backend seam to the GCE compute API.
pub trait GceApi: Send + Sync {
    /// Project ID from the ambient credentials.
    fn project_id(&self) -> BackendCall<String>;
    /// Point lookup of one named instance. `None` when no such instance
    /// exists in the zone.
    fn get_instance(&self, project: &str, zone: &str, name: &str)
        -> BackendCall<Option<GceInstance>>;
}

#[derive(Debug, Deserialize)]
struct GceSection {
    #[serde(default)]
    zone: String,
}

/// Resolver for GCE instances.
pub struct GceResolver {
    api: Arc<dyn GceApi>,
}

impl GceResolver {
    pub fn new(api: Arc<dyn GceApi>) -> Self {
        GceResolver { api }
    }
}

impl Resolve for GceResolver {
    fn resolve(&self, query: Query, config: Arc<ResolverConfig>) -> Resolving {
        let api = Arc::clone(&self.api);

        Box::pin(async move {
            tracing::debug!(provider = PROVIDER, query = %query, "starting resolution");

            let section: Option<GceSection> = config.section(PROVIDER)?;
            let zone = section
                .map(|s| s.zone)
                .filter(|z| !z.is_empty())
                .ok_or(ResolveError::MissingConfig {
                    provider: PROVIDER,
                    key: "zone",
                })?;

            let project = api
                .project_id()
                .await
                .map_err(|source| ResolveError::Backend {
                    provider: PROVIDER,
                    source,
                })?;

            let instance = api
                .get_instance(&project, &zone, query.as_str())
                .await
                .map_err(|source| ResolveError::Backend {
                    provider: PROVIDER,
                    source,
                })?;
            let Some(instance) = instance else {
                return Ok(Vec::new());
            };

            // An instance without an internal address is not dial-able.
            let Some(interface) = instance.network_interfaces.first() else {
                return Ok(Vec::new());
            };
            if interface.network_ip.is_empty() {
                return Ok(Vec::new());
            }

            let nat_ip = interface
                .access_configs
                .first()
                .map(|ac| ac.nat_ip.clone())
                .unwrap_or_default();

            Ok(vec![Host {
                provider: PROVIDER.into(),
                zone,
                id: instance.id.to_string(),
                private_ipv4: interface.network_ip.clone(),
                private: interface.network_ip.clone(),
                public_ipv4: nat_ip.clone(),
                public: nat_ip,
                ..Host::default()
            }])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct MockGce {
        instance: Option<GceInstance>,
    }

    impl GceApi for MockGce {
        fn project_id(&self) -> BackendCall<String> {
            Box::pin(async { Ok("test-project".to_string()) })
        }

        fn get_instance(
            &self,
            project: &str,
            zone: &str,
            _name: &str,
        ) -> BackendCall<Option<GceInstance>> {
            assert_eq!(project, "test-project");
            assert_eq!(zone, "europe-west1-b");
            let instance = self.instance.clone();
            Box::pin(async move { Ok(instance) })
        }
    }

    fn zoned_config() -> Arc<ResolverConfig> {
        Arc::new(
            ResolverConfig::new().with_provider(PROVIDER, json!({ "zone": "europe-west1-b" })),
        )
    }

    #[tokio::test]
    async fn test_missing_zone_is_config_error() {
        let resolver = GceResolver::new(Arc::new(MockGce { instance: None }));
        let err = resolver
            .resolve(Query::new("db-1"), Arc::new(ResolverConfig::new()))
            .await
            .unwrap_err();
        assert!(err.is_config());
    }

    #[tokio::test]
    async fn test_not_found_is_empty_not_error() {
        let resolver = GceResolver::new(Arc::new(MockGce { instance: None }));
        let hosts = resolver
            .resolve(Query::new("db-1"), zoned_config())
            .await
            .unwrap();
        assert!(hosts.is_empty());
    }

    #[tokio::test]
    async fn test_instance_without_interfaces_is_empty() {
        let resolver = GceResolver::new(Arc::new(MockGce {
            instance: Some(GceInstance {
                id: 42,
                network_interfaces: Vec::new(),
            }),
        }));
        let hosts = resolver
            .resolve(Query::new("db-1"), zoned_config())
            .await
            .unwrap();
        assert!(hosts.is_empty());
    }

    #[tokio::test]
    async fn test_point_lookup_normalization() {
        let resolver = GceResolver::new(Arc::new(MockGce {
            instance: Some(GceInstance {
                id: 42,
                network_interfaces: vec![GceNetworkInterface {
                    network_ip: "10.132.0.2".into(),
                    access_configs: vec![GceAccessConfig {
                        nat_ip: "35.187.1.2".into(),
                    }],
                }],
            }),
        }));

        let hosts = resolver
            .resolve(Query::new("db-1"), zoned_config())
            .await
            .unwrap();
        assert_eq!(hosts.len(), 1);
        let host = &hosts[0];
        assert_eq!(host.provider, "gce");
        assert_eq!(host.zone, "europe-west1-b");
        assert_eq!(host.id, "42");
        assert_eq!(host.private, "10.132.0.2");
        assert_eq!(host.public, "35.187.1.2");
    }

    #[tokio::test]
    async fn test_no_access_config_leaves_public_empty() {
        let resolver = GceResolver::new(Arc::new(MockGce {
            instance: Some(GceInstance {
                id: 7,
                network_interfaces: vec![GceNetworkInterface {
                    network_ip: "10.132.0.9".into(),
                    access_configs: Vec::new(),
                }],
            }),
        }));

        let hosts = resolver
            .resolve(Query::new("db-1"), zoned_config())
            .await
            .unwrap();
        assert_eq!(hosts[0].private, "10.132.0.9");
        assert!(hosts[0].public.is_empty());
    }
}
