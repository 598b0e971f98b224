//! Provider Resolvers
//!
//! One module per cloud provider, each owning three things:
//! - a backend trait that stands in for the provider's authenticated SDK
//!   client and delivers raw provider-native records
//! - the provider's matching/fallback policy over those records
//! - normalization into canonical [`Host`](crate::host::Host) records
//!
//! Authentication and wire-level SDK calls are out of scope: a backend
//! implementation is assumed to wrap an already-authenticated client.
//! Tests implement the backend traits with in-memory fixtures.

use crate::error::BackendError;
use crate::resolver::Registry;
use std::{future::Future, pin::Pin, sync::Arc};

mod aws;
mod azure;
mod digitalocean;
mod gce;
mod local;

pub use aws::{AwsResolver, Ec2Api, Ec2Instance, Ec2Tag};
pub use azure::{
    AzureApi, AzureResolver, AzureScaleSet, AzureScaleSetVm, AzureVm, InterfaceAddresses,
};
pub use digitalocean::{DigitalOceanResolver, Droplet, DropletApi};
pub use gce::{GceAccessConfig, GceApi, GceInstance, GceNetworkInterface, GceResolver};
pub use local::LocalResolver;

/// Alias for the `Future` type returned by a backend trait operation.
pub type BackendCall<T> = Pin<Box<dyn Future<Output = Result<T, BackendError>> + Send>>;

/// Backend implementations for every networked provider.
///
/// Each field wraps an already-authenticated client for its cloud; the
/// local resolver needs none.
pub struct Backends {
    pub ec2: Arc<dyn Ec2Api>,
    /// Region the EC2 session is bound to; AWS host records carry it
    /// because EC2 instance records do not state their own region.
    pub aws_region: String,
    pub azure: Arc<dyn AzureApi>,
    pub gce: Arc<dyn GceApi>,
    pub droplets: Arc<dyn DropletApi>,
}

/// Builds a registry holding all five provider resolvers.
///
/// This is the composition root the original design left to load-order
/// side effects; here every provider is wired in explicitly and callers
/// that want a different set register resolvers themselves.
pub fn bootstrap(backends: Backends) -> Registry {
    let mut registry = Registry::new();
    registry.register(
        "aws",
        Arc::new(AwsResolver::new(backends.ec2, backends.aws_region)),
    );
    registry.register("azure", Arc::new(AzureResolver::new(backends.azure)));
    registry.register("gce", Arc::new(GceResolver::new(backends.gce)));
    registry.register(
        "digitalocean",
        Arc::new(DigitalOceanResolver::new(backends.droplets)),
    );
    registry.register("local", Arc::new(LocalResolver));
    registry
}
