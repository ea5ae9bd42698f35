//! Control plane connection plumbing for pod and node inspection tools.
//!
//! This crate answers one question for its callers: "how do I talk to the
//! cluster from here?" It resolves a connection to the Kubernetes API server
//! without the caller having to know whether it runs inside a cluster pod or
//! against an external kubeconfig, and hands back a [`ClusterClient`] trait
//! object covering the handful of reads and writes an inspection tool needs.
//!
//! Resolution tries exactly one of three strategies, in order:
//!
//! 1. a pre-built client passed by the caller (test injection seam),
//! 2. an explicit kubeconfig path,
//! 3. the ambient in-cluster environment (`KUBERNETES_SERVICE_HOST` and
//!    `KUBERNETES_SERVICE_PORT` both set).
//!
//! When none of these apply, [`resolve_client`] returns `Ok(None)`: an
//! environment without cluster integration is a valid state, not a failure.
//!
//! # Example
//!
//! ```rust,no_run
//! use podtap::{host_identity, resolve_client};
//!
//! # async fn doc() -> Result<(), podtap::Error> {
//! if let Some(client) = resolve_client(None, None).await? {
//!     let node = client.get_node("worker-1").await?;
//!     let addresses = node
//!         .status
//!         .as_ref()
//!         .and_then(|s| s.addresses.as_deref())
//!         .unwrap_or(&[]);
//!     let identity = host_identity(addresses);
//!     println!("node runs at {:?} ({:?})", identity.host_ip, identity.hostname);
//! }
//! # Ok(())
//! # }
//! ```
pub mod client;
pub mod error;
pub mod host;
pub mod resolve;

pub use client::{ClusterClient, KubeClusterClient};
pub use error::Error;
pub use host::{host_identity, HostIdentity};
pub use resolve::{require_client, resolve_client};

/// Convenience alias for `Result<T, podtap::Error>`.
pub type Result<T, E = Error> = std::result::Result<T, E>;
