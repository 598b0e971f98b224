//! Resolution Core
//!
//! Provides the provider-independent machinery:
//! - The `Resolve` trait and `Query` identifier type
//! - The explicit provider `Registry`
//! - Concurrent fan-out/fan-in `dispatch`
//!
//! # Architecture
//!
//! Provider resolvers implement [`Resolve`] independently; nothing is
//! shared between them beyond the contract. The registry is built once at
//! startup by explicit registration calls and the dispatcher fans a query
//! out to every entry concurrently, tolerating individual failures.
//!
//! # Example
//!
//! ```rust,ignore
//! use cloudresolver::resolver::{dispatch, Query, Registry};
//!
//! let results = dispatch(&registry, Query::new("web-1"), config).await;
//! for entry in results {
//!     println!("{}: {} hosts", entry.provider, entry.hosts.len());
//! }
//! ```

mod dispatch;
mod registry;
mod resolve;

pub use dispatch::{dispatch, dispatch_with, DispatchOptions, ProviderResult};
pub use registry::Registry;
pub use resolve::{Query, Resolve, Resolving};
