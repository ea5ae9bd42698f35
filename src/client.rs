//! The capability trait consumers program against, and its production adapter.
//!
//! Inspection tools depend on [`ClusterClient`] rather than on a concrete
//! transport, so a canned-state double can stand in for the API server in
//! tests. Exactly one production implementation exists:
//! [`KubeClusterClient`], a thin delegating adapter over [`kube::Client`].
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Node, Pod};
use kube::{
    api::{Api, ListParams, PostParams},
    core::ObjectList,
};

use crate::error::Error;

/// Operations an inspection tool needs from the control plane.
///
/// Every method is a single synchronous request-response exchange: the call
/// blocks the task until the API server answers or the transport fails, and
/// failures surface once, immediately, with no retry or caching in between.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Fetch an arbitrary API sub-path verbatim.
    async fn get_raw(&self, path: &str) -> Result<Vec<u8>, Error>;

    /// Fetch a single pod.
    async fn get_pod(&self, namespace: &str, name: &str) -> Result<Pod, Error>;

    /// Write back a pod's status subresource.
    ///
    /// Conflicts surface as errors; there is no optimistic-lock re-read.
    async fn update_pod_status(&self, pod: &Pod) -> Result<Pod, Error>;

    /// Fetch a single node.
    async fn get_node(&self, name: &str) -> Result<Node, Error>;

    /// Fetch all nodes, unpaginated.
    async fn list_nodes(&self) -> Result<ObjectList<Node>, Error>;
}

impl std::fmt::Debug for dyn ClusterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn ClusterClient")
    }
}

/// Production adapter backed by a [`kube::Client`].
///
/// Each method delegates one-to-one to the underlying client with no added
/// logic: no field filtering, no default substitution, no retry.
#[derive(Clone)]
pub struct KubeClusterClient {
    client: kube::Client,
}

impl KubeClusterClient {
    /// Wrap an already-instantiated [`kube::Client`].
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }

    fn pods(&self, namespace: &str) -> Api<Pod> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn nodes(&self) -> Api<Node> {
        Api::all(self.client.clone())
    }
}

#[async_trait]
impl ClusterClient for KubeClusterClient {
    async fn get_raw(&self, path: &str) -> Result<Vec<u8>, Error> {
        let request = http::Request::get(path)
            .body(Vec::new())
            .map_err(kube::Error::HttpError)?;
        let body = self.client.request_text(request).await?;
        Ok(body.into_bytes())
    }

    async fn get_pod(&self, namespace: &str, name: &str) -> Result<Pod, Error> {
        Ok(self.pods(namespace).get(name).await?)
    }

    async fn update_pod_status(&self, pod: &Pod) -> Result<Pod, Error> {
        let namespace = pod.metadata.namespace.as_deref().unwrap_or("default");
        let name = pod
            .metadata
            .name
            .as_deref()
            .ok_or(Error::MissingObjectKey("metadata.name"))?;
        let body = serde_json::to_vec(pod)?;
        Ok(self
            .pods(namespace)
            .replace_status(name, &PostParams::default(), body)
            .await?)
    }

    async fn get_node(&self, name: &str) -> Result<Node, Error> {
        Ok(self.nodes().get(name).await?)
    }

    async fn list_nodes(&self) -> Result<ObjectList<Node>, Error> {
        Ok(self.nodes().list(&ListParams::default()).await?)
    }
}
