//! Error handling in [`podtap`][crate]
use std::path::PathBuf;

use thiserror::Error;

/// Possible errors when resolving or using a cluster connection.
///
/// Resolution failures carry the strategy that was attempted; per-call
/// transport failures are passed through from [`kube`] unchanged, with no
/// classification or retry performed here.
#[derive(Error, Debug)]
pub enum Error {
    /// The kubeconfig at the supplied path could not be turned into client
    /// configuration.
    ///
    /// Fatal to resolution: an explicit path is never silently skipped in
    /// favor of another strategy.
    #[error("failed to load kubeconfig from {path:?}: {source}")]
    Kubeconfig {
        /// Path the caller supplied.
        path: PathBuf,
        /// Underlying configuration error.
        #[source]
        source: kube::config::KubeconfigError,
    },

    /// The ambient in-cluster environment could not be turned into client
    /// configuration.
    ///
    /// Fatal to resolution, same as [`Error::Kubeconfig`].
    #[error("failed to load in-cluster config: {0}")]
    InCluster(#[source] kube::config::InClusterError),

    /// Transport instantiation or per-call failure, surfaced unchanged from
    /// [`kube`].
    #[error("kube error: {0}")]
    Kube(#[from] kube::Error),

    /// Failed to serialize a resource into a request body.
    #[error("failed to serialize resource: {0}")]
    Serde(#[from] serde_json::Error),

    /// A descriptor passed through this crate lacked a key the operation
    /// needs, e.g. a pod without `metadata.name` on a status update.
    #[error("missing object key: {0}")]
    MissingObjectKey(&'static str),

    /// Marker for an environment with no cluster integration configured.
    ///
    /// This is not a transport failure. Resolution reports the state as
    /// `Ok(None)`; [`require_client`](crate::resolve::require_client) maps it
    /// here for callers that need an error value.
    #[error("no cluster network configured")]
    NoClusterNetwork,
}
