//! The canonical host record.
//!
//! Every provider resolver normalizes its native instance representation
//! into a [`Host`], so callers see one shape regardless of which cloud the
//! instance lives in.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One resolved compute instance, normalized across providers.
///
/// All fields except `provider` are best-effort: a provider that does not
/// expose a dimension leaves the field empty. Records are constructed
/// fresh inside a provider resolver on every resolution call and treated
/// as immutable once handed to the caller.
///
/// The `private` and `public` fields carry the single address or name the
/// caller should actually dial for that reachability class. Each provider
/// applies its own convention: AWS is IP-centric on the private side and
/// name-centric on the public side, while Azure and DigitalOcean mirror
/// the IPv4 addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    /// Identifier of the owning resolver ("aws", "azure", "gce",
    /// "digitalocean", "local"). Always populated.
    pub provider: String,
    /// Logical name as known to the provider (tag- or metadata-derived).
    pub instance_name: String,
    /// Provider-specific instance size or SKU label.
    pub machine_type: String,
    pub region: String,
    pub zone: String,
    /// Provider-native unique identifier (ARN, resource ID, droplet ID).
    pub id: String,
    pub private_ipv4: String,
    pub private_ipv6: String,
    pub private_name: String,
    pub public_ipv4: String,
    pub public_ipv6: String,
    pub public_name: String,
    /// Best dial-able private endpoint, per the provider's convention.
    pub private: String,
    /// Best dial-able public endpoint, per the provider's convention.
    pub public: String,
    /// Provider-native tags or labels. Azure-only in the current scope;
    /// other providers leave this empty.
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl Host {
    /// Creates an otherwise-empty record owned by `provider`.
    pub fn for_provider(provider: impl Into<String>) -> Self {
        Host {
            provider: provider.into(),
            ..Host::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_provider_sets_owner_only() {
        let host = Host::for_provider("aws");
        assert_eq!(host.provider, "aws");
        assert!(host.id.is_empty());
        assert!(host.tags.is_empty());
    }

    #[test]
    fn test_host_serde_round_trip() {
        let mut host = Host::for_provider("azure");
        host.private_ipv4 = "10.0.0.4".into();
        host.tags.insert("env".into(), "prod".into());

        let json = serde_json::to_string(&host).unwrap();
        let back: Host = serde_json::from_str(&json).unwrap();
        assert_eq!(host, back);
    }
}
