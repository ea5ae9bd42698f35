//! Host identity: where a pod or node actually lives.
//!
//! Inspection tools need the hostname and internal IP of the machine backing
//! a node in order to reach it outside the API server. [`host_identity`] is
//! the pure extraction over a node's address list; the async helpers walk the
//! pod → node → addresses chain through a [`ClusterClient`].
use k8s_openapi::api::core::v1::{Node, NodeAddress};

use crate::client::ClusterClient;
use crate::error::Error;

/// Hostname and internal IP extracted from a node's address list.
///
/// Either side is `None` when the node reported no address of that kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostIdentity {
    /// Address of kind `Hostname`, if any.
    pub hostname: Option<String>,
    /// Address of kind `InternalIP`, if any.
    pub host_ip: Option<String>,
}

/// Scan a node's address list for its hostname and internal IP.
///
/// Every entry is visited once, in list order; when a kind repeats, the last
/// entry wins. Entries of any other kind are ignored. This never fails: a
/// list without a given kind simply leaves that side empty.
pub fn host_identity(addresses: &[NodeAddress]) -> HostIdentity {
    let mut identity = HostIdentity::default();
    for address in addresses {
        match address.type_.as_str() {
            "Hostname" => identity.hostname = Some(address.address.clone()),
            "InternalIP" => identity.host_ip = Some(address.address.clone()),
            _ => {}
        }
    }
    identity
}

fn node_addresses(node: &Node) -> &[NodeAddress] {
    node.status
        .as_ref()
        .and_then(|status| status.addresses.as_deref())
        .unwrap_or(&[])
}

/// Fetch a node and extract its [`HostIdentity`].
pub async fn node_host_identity(
    client: &dyn ClusterClient,
    name: &str,
) -> Result<HostIdentity, Error> {
    let node = client.get_node(name).await?;
    Ok(host_identity(node_addresses(&node)))
}

/// Fetch a pod, follow `spec.nodeName` to the node it runs on, and extract
/// that node's [`HostIdentity`].
///
/// A pod that has not been scheduled yet has no `spec.nodeName`; that
/// surfaces as [`Error::MissingObjectKey`].
pub async fn pod_host_identity(
    client: &dyn ClusterClient,
    namespace: &str,
    name: &str,
) -> Result<HostIdentity, Error> {
    let pod = client.get_pod(namespace, name).await?;
    let node_name = pod
        .spec
        .as_ref()
        .and_then(|spec| spec.node_name.as_deref())
        .ok_or(Error::MissingObjectKey("spec.nodeName"))?;
    node_host_identity(client, node_name).await
}
