//! AWS resolver with tiered fallback matching.
//!
//! The identifier is tried against three attributes in strict precedence
//! order, stopping at the first tier that matches at least one running
//! instance:
//!
//! 1. `tag:Name` equals the identifier exactly
//! 2. instance ID equals the identifier exactly
//! 3. private IPv4 address equals the identifier exactly
//!
//! Non-running instances never match, at any tier. The purpose of
//! resolution is connecting to hosts, and only running ones are reachable.

use super::BackendCall;
use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::host::Host;
use crate::resolver::{Query, Resolve, Resolving};
use std::fmt;
use std::sync::Arc;

const PROVIDER: &str = "aws";
const STATE_RUNNING: &str = "running";
const NAME_TAG: &str = "Name";

/// One key/value tag as EC2 reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ec2Tag {
    pub key: String,
    pub value: String,
}

/// Raw EC2 instance record, as flattened out of a describe-instances
/// reservation. Empty strings stand for fields the API omitted.
#[derive(Debug, Clone, Default)]
pub struct Ec2Instance {
    pub instance_id: String,
    /// Instance state name ("pending", "running", "stopped", ...).
    pub state: String,
    pub instance_type: String,
    pub availability_zone: String,
    pub private_ipv4: String,
    pub private_dns_name: String,
    pub public_dns_name: String,
    pub tags: Vec<Ec2Tag>,
}

impl Ec2Instance {
    /// The value of the `Name` tag, if the instance carries one.
    pub fn name_tag(&self) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.key == NAME_TAG)
            .map(|t| t.value.as_str())
    }

    fn is_running(&self) -> bool {
        self.state == STATE_RUNNING
    }
}

/// Backend seam to the EC2 API.
///
/// Implementations wrap an authenticated EC2 session and return every
/// instance visible to it, following pagination to completion.
pub trait Ec2Api: Send + Sync {
    fn describe_instances(&self) -> BackendCall<Vec<Ec2Instance>>;
}

/// One precedence level of the fallback matching policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    NameTag,
    InstanceId,
    PrivateIp,
}

impl Tier {
    const ORDER: [Tier; 3] = [Tier::NameTag, Tier::InstanceId, Tier::PrivateIp];

    fn matches(self, instance: &Ec2Instance, query: &Query) -> bool {
        match self {
            Tier::NameTag => instance.name_tag() == Some(query.as_str()),
            Tier::InstanceId => instance.instance_id == query.as_str(),
            Tier::PrivateIp => instance.private_ipv4 == query.as_str(),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::NameTag => "tag:Name",
            Tier::InstanceId => "instance-id",
            Tier::PrivateIp => "private-ip",
        };
        f.write_str(label)
    }
}

/// Resolver for EC2 instances.
pub struct AwsResolver {
    api: Arc<dyn Ec2Api>,
    region: String,
}

impl AwsResolver {
    /// Creates a resolver over `api`. `region` is the region the backing
    /// session is configured for; it is stamped on every host record.
    pub fn new(api: Arc<dyn Ec2Api>, region: impl Into<String>) -> Self {
        AwsResolver {
            api,
            region: region.into(),
        }
    }
}

impl Resolve for AwsResolver {
    fn resolve(&self, query: Query, _config: Arc<ResolverConfig>) -> Resolving {
        let api = Arc::clone(&self.api);
        let region = self.region.clone();

        Box::pin(async move {
            tracing::debug!(provider = PROVIDER, query = %query, "starting resolution");

            let instances = api
                .describe_instances()
                .await
                .map_err(|source| ResolveError::Backend {
                    provider: PROVIDER,
                    source,
                })?;

            let matched = match_tiers(&instances, &query);
            Ok(matched
                .into_iter()
                .map(|inst| to_host(inst, &region))
                .collect())
        })
    }
}

/// Applies the fallback tiers in precedence order, returning the matches
/// of the first tier that yields any running instance.
fn match_tiers<'a>(instances: &'a [Ec2Instance], query: &Query) -> Vec<&'a Ec2Instance> {
    for tier in Tier::ORDER {
        let matched: Vec<&Ec2Instance> = instances
            .iter()
            .filter(|inst| inst.is_running() && tier.matches(inst, query))
            .collect();
        if !matched.is_empty() {
            tracing::debug!(provider = PROVIDER, tier = %tier, count = matched.len(), "tier matched");
            return matched;
        }
    }
    Vec::new()
}

fn to_host(instance: &Ec2Instance, region: &str) -> Host {
    Host {
        provider: PROVIDER.into(),
        instance_name: instance.name_tag().unwrap_or_default().into(),
        machine_type: instance.instance_type.clone(),
        region: region.into(),
        zone: instance.availability_zone.clone(),
        id: instance.instance_id.clone(),
        private_ipv4: instance.private_ipv4.clone(),
        private_name: instance.private_dns_name.clone(),
        public_name: instance.public_dns_name.clone(),
        // AWS addressing convention: private side is IP-centric, public
        // side is name-centric.
        private: instance.private_ipv4.clone(),
        public: instance.public_dns_name.clone(),
        ..Host::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(id: &str, name: Option<&str>, state: &str, ip: &str) -> Ec2Instance {
        Ec2Instance {
            instance_id: id.into(),
            state: state.into(),
            instance_type: "t3.micro".into(),
            availability_zone: "eu-west-1a".into(),
            private_ipv4: ip.into(),
            private_dns_name: format!("{ip}.ec2.internal"),
            public_dns_name: format!("{id}.compute.amazonaws.com"),
            tags: name
                .map(|n| {
                    vec![Ec2Tag {
                        key: "Name".into(),
                        value: n.into(),
                    }]
                })
                .unwrap_or_default(),
        }
    }

    #[test]
    fn test_tag_tier_wins_over_id_and_ip() {
        let fleet = vec![
            instance("i-aaa", Some("web-1"), "running", "10.0.0.1"),
            // Same identifier as the first instance's tag, but only via ID.
            instance("web-1", Some("other"), "running", "10.0.0.2"),
        ];
        let matched = match_tiers(&fleet, &Query::new("web-1"));
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].instance_id, "i-aaa");
    }

    #[test]
    fn test_id_tier_when_no_tag_match() {
        let fleet = vec![
            instance("i-aaa", Some("web-1"), "running", "10.0.0.1"),
            instance("i-bbb", None, "running", "10.0.0.2"),
        ];
        let matched = match_tiers(&fleet, &Query::new("i-bbb"));
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].instance_id, "i-bbb");
    }

    #[test]
    fn test_ip_tier_when_no_tag_or_id_match() {
        let fleet = vec![instance("i-aaa", Some("web-1"), "running", "10.0.0.1")];
        let matched = match_tiers(&fleet, &Query::new("10.0.0.1"));
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_stopped_instance_never_matches() {
        let fleet = vec![instance("i-aaa", Some("web-1"), "stopped", "10.0.0.1")];
        assert!(match_tiers(&fleet, &Query::new("web-1")).is_empty());
        assert!(match_tiers(&fleet, &Query::new("i-aaa")).is_empty());
        assert!(match_tiers(&fleet, &Query::new("10.0.0.1")).is_empty());
    }

    #[test]
    fn test_host_normalization() {
        let inst = instance("i-aaa", Some("web-1"), "running", "10.0.0.1");
        let host = to_host(&inst, "eu-west-1");

        assert_eq!(host.provider, "aws");
        assert_eq!(host.instance_name, "web-1");
        assert_eq!(host.machine_type, "t3.micro");
        assert_eq!(host.region, "eu-west-1");
        assert_eq!(host.zone, "eu-west-1a");
        assert_eq!(host.private, "10.0.0.1");
        assert_eq!(host.public, "i-aaa.compute.amazonaws.com");
        assert!(host.public_ipv4.is_empty());
    }

    #[test]
    fn test_untagged_instance_has_empty_name() {
        let inst = instance("i-bbb", None, "running", "10.0.0.2");
        assert_eq!(to_host(&inst, "eu-west-1").instance_name, "");
    }
}
