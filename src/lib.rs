//! # cloudresolver
//!
//! Resolves a logical instance identifier (a name, tag, or partial
//! identifier) into the network addresses and location metadata of a
//! running compute instance, searching several cloud providers
//! concurrently and returning a uniform result regardless of provider.
//!
//! `cloudresolver` is a building block for deployment and orchestration
//! tooling that needs to contact a machine by logical name without
//! embedding provider-specific lookup logic.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cloudresolver::config::ResolverConfig;
//! use cloudresolver::providers::{bootstrap, Backends};
//! use cloudresolver::resolver::{dispatch, Query};
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = bootstrap(Backends { /* authenticated backends */ });
//!     let config = ResolverConfig::from_json_str(
//!         r#"{ "providers": { "gce": { "zone": "europe-west1-b" } } }"#,
//!     ).unwrap().into_shared();
//!
//!     let results = dispatch(&registry, Query::new("web-1"), config).await;
//!     print!("{}", cloudresolver::report::render(&results));
//! }
//! ```
//!
//! ## Modules
//!
//! - [`host`] - The canonical normalized host record
//! - [`resolver`] - The `Resolve` trait, registry, and concurrent dispatch
//! - [`providers`] - Per-provider resolvers and their backend seams
//! - [`config`] - Read-only nested provider configuration
//! - [`error`] - The per-provider error taxonomy
//! - [`report`] - Fixed tabular rendering of aggregate results
//!
//! ## Semantics
//!
//! - "Not found" is an empty host list, never an error.
//! - One provider's failure never aborts the others; partial results from
//!   healthy providers are always returned.
//! - Aggregate order reflects completion order and carries no meaning.

pub mod config;
pub mod error;
pub mod host;
pub mod providers;
pub mod report;
pub mod resolver;
