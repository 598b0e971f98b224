//! Azure resolver with two-level enumeration and tag precedence.
//!
//! Two populations are enumerated and merged: standalone virtual machines
//! and scale-set member instances (each set's members fetched via a
//! secondary enumeration). Addressing needs a second round-trip per
//! instance to fetch the attached network interfaces' IP configurations.
//!
//! # Naming and tags
//!
//! The effective instance name defaults to the `Name` tag. For scale
//! sets, the set's computer-name-prefix overrides the tag when present,
//! and each member's own `Name` tag (if present) overrides again,
//! suffixed with the member's numeric instance ID to disambiguate members
//! of the same set.
//!
//! Tag mapping starts from the set level and is overlaid key-by-key with
//! instance-level tags; a collision keeps the instance value and is
//! surfaced as a warning event.

use super::BackendCall;
use crate::config::ResolverConfig;
use crate::error::{BackendError, ResolveError};
use crate::host::Host;
use crate::resolver::{Query, Resolve, Resolving};
use std::collections::HashMap;
use std::sync::Arc;

const PROVIDER: &str = "azure";
const NAME_TAG: &str = "Name";

/// Raw standalone virtual machine record.
#[derive(Debug, Clone, Default)]
pub struct AzureVm {
    /// Full resource ID.
    pub id: String,
    pub location: String,
    /// Hardware profile VM size ("Standard_B2s", ...).
    pub vm_size: String,
    pub tags: HashMap<String, String>,
    /// Resource IDs of the attached network interfaces.
    pub nic_ids: Vec<String>,
}

/// Raw scale-set record. Member instances are fetched separately.
#[derive(Debug, Clone, Default)]
pub struct AzureScaleSet {
    pub id: String,
    pub name: String,
    /// OS profile computer-name-prefix, when the set defines one.
    pub computer_name_prefix: Option<String>,
    pub tags: HashMap<String, String>,
}

/// Raw scale-set member instance record.
#[derive(Debug, Clone, Default)]
pub struct AzureScaleSetVm {
    pub id: String,
    /// Numeric instance ID within the set, stringified.
    pub instance_id: String,
    pub location: String,
    /// SKU name of the member ("Standard_B2s", ...).
    pub sku_name: String,
    pub tags: HashMap<String, String>,
    pub nic_ids: Vec<String>,
}

/// Addresses resolved from one network interface's IP configurations.
///
/// Private fields come from the IP configuration marked primary; public
/// fields from the interface's associated public-IP resource. Empty
/// strings stand for dimensions the interface does not carry.
#[derive(Debug, Clone, Default)]
pub struct InterfaceAddresses {
    pub private_ipv4: String,
    pub private_ipv6: String,
    pub public_ipv4: String,
    pub public_ipv6: String,
    /// Fully-qualified name from the public IP's DNS settings, if set.
    pub public_name: String,
}

/// Backend seam to the Azure compute and network APIs.
///
/// Implementations wrap authenticated management clients for one
/// subscription and follow pagination to completion.
pub trait AzureApi: Send + Sync {
    fn list_virtual_machines(&self) -> BackendCall<Vec<AzureVm>>;
    fn list_scale_sets(&self) -> BackendCall<Vec<AzureScaleSet>>;
    fn list_scale_set_instances(&self, set_id: &str) -> BackendCall<Vec<AzureScaleSetVm>>;
    /// IP configurations of a standalone VM's interface, public side
    /// included.
    fn interface_addresses(&self, nic_id: &str) -> BackendCall<InterfaceAddresses>;
    /// IP configurations of a scale-set member's interface. Scale-set
    /// members do not resolve public addressing in this design.
    fn scale_set_interface_addresses(&self, nic_id: &str) -> BackendCall<InterfaceAddresses>;
}

/// Resolver for Azure virtual machines and scale sets.
pub struct AzureResolver {
    api: Arc<dyn AzureApi>,
}

impl AzureResolver {
    pub fn new(api: Arc<dyn AzureApi>) -> Self {
        AzureResolver { api }
    }
}

fn backend(source: BackendError) -> ResolveError {
    ResolveError::Backend {
        provider: PROVIDER,
        source,
    }
}

impl Resolve for AzureResolver {
    fn resolve(&self, query: Query, _config: Arc<ResolverConfig>) -> Resolving {
        let api = Arc::clone(&self.api);

        Box::pin(async move {
            tracing::debug!(provider = PROVIDER, query = %query, "starting resolution");
            let mut hosts = Vec::new();

            // Standalone virtual machines.
            for vm in api.list_virtual_machines().await.map_err(backend)? {
                let name = vm.tags.get(NAME_TAG).cloned().unwrap_or_default();
                if !query.selects(&name) {
                    continue;
                }

                let mut host = Host {
                    provider: PROVIDER.into(),
                    instance_name: name,
                    machine_type: vm.vm_size.clone(),
                    region: vm.location.clone(),
                    id: vm.id.clone(),
                    tags: vm.tags.clone(),
                    ..Host::default()
                };
                // A failed interface fetch is fatal to the whole provider
                // call, not just this instance.
                for nic_id in &vm.nic_ids {
                    let addrs = api.interface_addresses(nic_id).await.map_err(backend)?;
                    apply_vm_addresses(&mut host, &addrs);
                }
                hosts.push(host);
            }

            // Scale sets and their member instances.
            for set in api.list_scale_sets().await.map_err(backend)? {
                let members = api.list_scale_set_instances(&set.id).await.map_err(backend)?;
                for member in members {
                    let name = effective_member_name(&set, &member);
                    if !query.selects(&name) && !query.selects(&set.name) {
                        continue;
                    }
                    let tags = overlay_tags(&set, &member);

                    let mut host = Host {
                        provider: PROVIDER.into(),
                        instance_name: name,
                        machine_type: member.sku_name.clone(),
                        region: member.location.clone(),
                        id: member.id.clone(),
                        tags,
                        ..Host::default()
                    };
                    for nic_id in &member.nic_ids {
                        let addrs = api
                            .scale_set_interface_addresses(nic_id)
                            .await
                            .map_err(backend)?;
                        host.private_ipv4 = addrs.private_ipv4.clone();
                        host.private_ipv6 = addrs.private_ipv6.clone();
                        host.private = addrs.private_ipv4.clone();
                    }
                    hosts.push(host);
                }
            }

            Ok(hosts)
        })
    }
}

fn apply_vm_addresses(host: &mut Host, addrs: &InterfaceAddresses) {
    host.private_ipv4 = addrs.private_ipv4.clone();
    host.private_ipv6 = addrs.private_ipv6.clone();
    host.public_ipv4 = addrs.public_ipv4.clone();
    host.public_ipv6 = addrs.public_ipv6.clone();
    host.public_name = addrs.public_name.clone();
    // Convenience endpoints mirror the IPv4 addresses.
    host.private = addrs.private_ipv4.clone();
    host.public = addrs.public_ipv4.clone();
}

/// Name precedence for a scale-set member: set `Name` tag, overridden by
/// the set's computer-name-prefix, overridden by the member's own `Name`
/// tag suffixed with its instance ID.
fn effective_member_name(set: &AzureScaleSet, member: &AzureScaleSetVm) -> String {
    let mut name = set.tags.get(NAME_TAG).cloned().unwrap_or_default();
    if let Some(prefix) = &set.computer_name_prefix {
        name = prefix.clone();
    }
    if let Some(tag) = member.tags.get(NAME_TAG) {
        name = format!("{}_{}", tag, member.instance_id);
    }
    name
}

/// Set-level tags overlaid key-by-key with member-level tags. The member
/// value wins; collisions are reported, not silently dropped.
fn overlay_tags(set: &AzureScaleSet, member: &AzureScaleSetVm) -> HashMap<String, String> {
    let mut tags = set.tags.clone();
    for (key, value) in &member.tags {
        if let Some(previous) = tags.get(key) {
            if previous != value {
                tracing::warn!(
                    provider = PROVIDER,
                    scale_set = %set.name,
                    instance = %member.instance_id,
                    key = %key,
                    set_value = %previous,
                    instance_value = %value,
                    "instance tag overrides scale set tag"
                );
            }
        }
        tags.insert(key.clone(), value.clone());
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn set(name: &str, prefix: Option<&str>, set_tags: HashMap<String, String>) -> AzureScaleSet {
        AzureScaleSet {
            id: format!("/subscriptions/s/resourceGroups/rg/providers/Microsoft.Compute/virtualMachineScaleSets/{name}"),
            name: name.into(),
            computer_name_prefix: prefix.map(Into::into),
            tags: set_tags,
        }
    }

    fn member(instance_id: &str, member_tags: HashMap<String, String>) -> AzureScaleSetVm {
        AzureScaleSetVm {
            id: format!("/subscriptions/s/.../virtualMachines/{instance_id}"),
            instance_id: instance_id.into(),
            location: "westeurope".into(),
            sku_name: "Standard_B2s".into(),
            tags: member_tags,
            nic_ids: Vec::new(),
        }
    }

    #[test]
    fn test_overlay_instance_tag_wins() {
        let set = set("web-set", None, tags(&[("env", "prod"), ("team", "infra")]));
        let member = member("0", tags(&[("env", "staging")]));

        let merged = overlay_tags(&set, &member);
        assert_eq!(merged.get("env").map(String::as_str), Some("staging"));
        assert_eq!(merged.get("team").map(String::as_str), Some("infra"));
    }

    #[test]
    fn test_overlay_adds_new_keys() {
        let set = set("web-set", None, tags(&[("env", "prod")]));
        let member = member("0", tags(&[("role", "frontend")]));

        let merged = overlay_tags(&set, &member);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("role").map(String::as_str), Some("frontend"));
    }

    #[test]
    fn test_member_name_defaults_to_set_name_tag() {
        let set = set("web-set", None, tags(&[("Name", "web")]));
        let member = member("3", HashMap::new());
        assert_eq!(effective_member_name(&set, &member), "web");
    }

    #[test]
    fn test_member_name_prefix_overrides_tag() {
        let set = set("web-set", Some("webvm"), tags(&[("Name", "web")]));
        let member = member("3", HashMap::new());
        assert_eq!(effective_member_name(&set, &member), "webvm");
    }

    #[test]
    fn test_member_name_tag_with_id_suffix_overrides_all() {
        let set = set("web-set", Some("webvm"), tags(&[("Name", "web")]));
        let member = member("3", tags(&[("Name", "canary")]));
        assert_eq!(effective_member_name(&set, &member), "canary_3");
    }

    #[test]
    fn test_vm_addresses_mirror_ipv4() {
        let mut host = Host::for_provider(PROVIDER);
        apply_vm_addresses(
            &mut host,
            &InterfaceAddresses {
                private_ipv4: "10.0.0.4".into(),
                public_ipv4: "52.1.2.3".into(),
                public_name: "web.westeurope.cloudapp.azure.com".into(),
                ..InterfaceAddresses::default()
            },
        );
        assert_eq!(host.private, "10.0.0.4");
        assert_eq!(host.public, "52.1.2.3");
        assert_eq!(host.public_name, "web.westeurope.cloudapp.azure.com");
    }
}
