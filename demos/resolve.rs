//! Resolves an identifier across all providers and prints the report.
//!
//! Real deployments hand `bootstrap` backends wrapping authenticated SDK
//! clients; this demo substitutes in-memory fixtures so it runs without
//! credentials.
//!
//! ```sh
//! cargo run --example resolve -- web-1
//! ```

use cloudresolver::config::ResolverConfig;
use cloudresolver::providers::{
    bootstrap, AzureApi, AzureScaleSet, AzureScaleSetVm, AzureVm, BackendCall, Backends, Droplet,
    DropletApi, Ec2Api, Ec2Instance, Ec2Tag, GceApi, GceAccessConfig, GceInstance,
    GceNetworkInterface, InterfaceAddresses,
};
use cloudresolver::report;
use cloudresolver::resolver::{dispatch_with, DispatchOptions, Query};
use std::sync::Arc;
use std::time::Duration;

struct DemoEc2;

impl Ec2Api for DemoEc2 {
    fn describe_instances(&self) -> BackendCall<Vec<Ec2Instance>> {
        Box::pin(async {
            Ok(vec![
                Ec2Instance {
                    instance_id: "i-0a1b2c3d4e5f60789".into(),
                    state: "running".into(),
                    instance_type: "t3.micro".into(),
                    availability_zone: "eu-west-1a".into(),
                    private_ipv4: "10.0.1.10".into(),
                    private_dns_name: "ip-10-0-1-10.eu-west-1.compute.internal".into(),
                    public_dns_name: "ec2-34-240-1-10.eu-west-1.compute.amazonaws.com".into(),
                    tags: vec![Ec2Tag {
                        key: "Name".into(),
                        value: "web-1".into(),
                    }],
                },
                Ec2Instance {
                    instance_id: "i-0fedcba987654321f".into(),
                    state: "stopped".into(),
                    instance_type: "t3.micro".into(),
                    availability_zone: "eu-west-1b".into(),
                    private_ipv4: "10.0.1.11".into(),
                    private_dns_name: "ip-10-0-1-11.eu-west-1.compute.internal".into(),
                    public_dns_name: String::new(),
                    tags: vec![Ec2Tag {
                        key: "Name".into(),
                        value: "web-2".into(),
                    }],
                },
            ])
        })
    }
}

struct DemoAzure;

impl AzureApi for DemoAzure {
    fn list_virtual_machines(&self) -> BackendCall<Vec<AzureVm>> {
        Box::pin(async {
            Ok(vec![AzureVm {
                id: "/subscriptions/demo/resourceGroups/rg/providers/Microsoft.Compute/virtualMachines/web-az".into(),
                location: "westeurope".into(),
                vm_size: "Standard_B2s".into(),
                tags: [("Name".to_string(), "web-az".to_string())].into(),
                nic_ids: vec!["web-az-nic0".into()],
            }])
        })
    }

    fn list_scale_sets(&self) -> BackendCall<Vec<AzureScaleSet>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn list_scale_set_instances(&self, _set_id: &str) -> BackendCall<Vec<AzureScaleSetVm>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn interface_addresses(&self, _nic_id: &str) -> BackendCall<InterfaceAddresses> {
        Box::pin(async {
            Ok(InterfaceAddresses {
                private_ipv4: "10.1.0.4".into(),
                public_ipv4: "52.166.100.4".into(),
                public_name: "web-az.westeurope.cloudapp.azure.com".into(),
                ..InterfaceAddresses::default()
            })
        })
    }

    fn scale_set_interface_addresses(&self, _nic_id: &str) -> BackendCall<InterfaceAddresses> {
        Box::pin(async { Ok(InterfaceAddresses::default()) })
    }
}

struct DemoGce;

impl GceApi for DemoGce {
    fn project_id(&self) -> BackendCall<String> {
        Box::pin(async { Ok("demo-project".to_string()) })
    }

    fn get_instance(
        &self,
        _project: &str,
        _zone: &str,
        name: &str,
    ) -> BackendCall<Option<GceInstance>> {
        let found = name == "web-1";
        Box::pin(async move {
            Ok(found.then(|| GceInstance {
                id: 5123456789012345678,
                network_interfaces: vec![GceNetworkInterface {
                    network_ip: "10.132.0.7".into(),
                    access_configs: vec![GceAccessConfig {
                        nat_ip: "35.187.90.7".into(),
                    }],
                }],
            }))
        })
    }
}

struct DemoDroplets;

impl DropletApi for DemoDroplets {
    fn list_droplets(&self) -> BackendCall<Vec<Droplet>> {
        Box::pin(async {
            Ok(vec![Droplet {
                id: 289110074,
                name: "web-1".into(),
                region_slug: "ams3".into(),
                public_ipv4: "188.166.50.3".into(),
                private_ipv4: "10.133.0.3".into(),
                public_ipv6: "2a03:b0c0:2:d0::1".into(),
            }])
        })
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cloudresolver=debug".into()),
        )
        .init();

    let identifier = std::env::args().nth(1).unwrap_or_else(|| "web-1".into());

    let registry = bootstrap(Backends {
        ec2: Arc::new(DemoEc2),
        aws_region: "eu-west-1".into(),
        azure: Arc::new(DemoAzure),
        gce: Arc::new(DemoGce),
        droplets: Arc::new(DemoDroplets),
    });

    let config = ResolverConfig::from_json_str(
        r#"{ "providers": { "gce": { "zone": "europe-west1-b" } } }"#,
    )
    .expect("demo config is valid JSON")
    .into_shared();

    let results = dispatch_with(
        &registry,
        Query::new(identifier),
        config,
        DispatchOptions::with_timeout(Duration::from_secs(20)),
    )
    .await;

    for entry in results.iter().filter(|r| !r.is_ok()) {
        eprintln!(
            "warning: {} failed: {}",
            entry.provider,
            entry.error.as_ref().expect("checked by filter")
        );
    }

    print!("{}", report::render(&results));
}
