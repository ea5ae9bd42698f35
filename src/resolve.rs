//! Connection resolution: decide how to reach the control plane, if at all.
//!
//! [`resolve_client`] tries exactly one of three strategies, in a fixed
//! priority order: a pre-built client supplied by the caller, an explicit
//! kubeconfig path, or the ambient in-cluster environment. An environment
//! where none of these apply resolves to `Ok(None)`; callers must treat that
//! as "cluster integration not configured", not as a failure.
use std::env;
use std::path::Path;
use std::sync::Arc;

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Config;

use crate::client::{ClusterClient, KubeClusterClient};
use crate::error::Error;

/// Environment variable holding the in-cluster API service host.
pub const SERVICE_HOST_ENV: &str = "KUBERNETES_SERVICE_HOST";
/// Environment variable holding the in-cluster API service port.
pub const SERVICE_PORT_ENV: &str = "KUBERNETES_SERVICE_PORT";

/// Snapshot of the two ambient in-cluster signals.
///
/// Process environment reads happen only in [`ClusterEnv::from_process`];
/// tests pass explicit values instead of mutating the real environment.
#[derive(Clone, Debug, Default)]
struct ClusterEnv {
    service_host: Option<String>,
    service_port: Option<String>,
}

impl ClusterEnv {
    fn from_process() -> Self {
        Self {
            service_host: env::var(SERVICE_HOST_ENV).ok().filter(|v| !v.is_empty()),
            service_port: env::var(SERVICE_PORT_ENV).ok().filter(|v| !v.is_empty()),
        }
    }

    /// Both signals must be present for ambient resolution to trigger.
    fn detected(&self) -> bool {
        self.service_host.is_some() && self.service_port.is_some()
    }
}

/// Resolve a connection to the cluster control plane.
///
/// Strategies, mutually exclusive and in priority order:
///
/// 1. `injected` is returned unmodified when present. This is the seam for
///    wiring test doubles; production callers pass `None`.
/// 2. A non-empty `kubeconfig` path is loaded as client configuration.
///    Failure is fatal and names the path; ambient detection is never
///    consulted when a path was given.
/// 3. With no path, the ambient environment is used when both
///    [`SERVICE_HOST_ENV`] and [`SERVICE_PORT_ENV`] are non-empty. Failure to
///    build the in-cluster configuration is fatal.
/// 4. Otherwise resolution succeeds with `Ok(None)`.
///
/// Only after a configuration was built (strategies 2 and 3) is the transport
/// client instantiated; a failure there surfaces unchanged and no partial
/// handle is returned.
pub async fn resolve_client(
    kubeconfig: Option<&Path>,
    injected: Option<Arc<dyn ClusterClient>>,
) -> Result<Option<Arc<dyn ClusterClient>>, Error> {
    resolve_with_env(kubeconfig, injected, &ClusterEnv::from_process()).await
}

/// Resolve a connection, treating an unconfigured environment as an error.
///
/// Same policy as [`resolve_client`], with the "no connection" outcome mapped
/// to [`Error::NoClusterNetwork`] for callers that cannot proceed without a
/// cluster.
pub async fn require_client(kubeconfig: Option<&Path>) -> Result<Arc<dyn ClusterClient>, Error> {
    resolve_client(kubeconfig, None)
        .await?
        .ok_or(Error::NoClusterNetwork)
}

async fn resolve_with_env(
    kubeconfig: Option<&Path>,
    injected: Option<Arc<dyn ClusterClient>>,
    cluster_env: &ClusterEnv,
) -> Result<Option<Arc<dyn ClusterClient>>, Error> {
    if let Some(client) = injected {
        tracing::trace!("using pre-built cluster client");
        return Ok(Some(client));
    }

    let config = if let Some(path) = kubeconfig {
        tracing::trace!(path = %path.display(), "building client config from kubeconfig");
        let parsed = Kubeconfig::read_from(path).map_err(|source| Error::Kubeconfig {
            path: path.to_path_buf(),
            source,
        })?;
        Config::from_custom_kubeconfig(parsed, &KubeConfigOptions::default())
            .await
            .map_err(|source| Error::Kubeconfig {
                path: path.to_path_buf(),
                source,
            })?
    } else if cluster_env.detected() {
        tracing::trace!("building in-cluster client config");
        Config::incluster().map_err(Error::InCluster)?
    } else {
        tracing::trace!("no kubeconfig path and no cluster environment, skipping cluster integration");
        return Ok(None);
    };

    let client = kube::Client::try_from(config)?;
    Ok(Some(Arc::new(KubeClusterClient::new(client))))
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use super::*;
    use crate::client::canned::StubCluster;

    fn cluster_env(host: Option<&str>, port: Option<&str>) -> ClusterEnv {
        ClusterEnv {
            service_host: host.map(String::from),
            service_port: port.map(String::from),
        }
    }

    #[tokio::test]
    async fn injected_client_short_circuits_resolution() {
        let stub: Arc<dyn ClusterClient> = Arc::new(StubCluster::default());
        // Bad path and detected environment must both be ignored.
        let resolved = resolve_with_env(
            Some(Path::new("/definitely/not/a/kubeconfig")),
            Some(stub.clone()),
            &cluster_env(Some("10.96.0.1"), Some("443")),
        )
        .await
        .unwrap()
        .unwrap();
        assert!(Arc::ptr_eq(&resolved, &stub));
    }

    #[tokio::test]
    async fn bad_kubeconfig_path_is_fatal_and_names_the_path() {
        // The detected environment must not be consulted as a fallback.
        let err = resolve_with_env(
            Some(Path::new("/definitely/not/a/kubeconfig")),
            None,
            &cluster_env(Some("10.96.0.1"), Some("443")),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Kubeconfig { ref path, .. } if path == &PathBuf::from("/definitely/not/a/kubeconfig")
        ));
        assert!(err.to_string().contains("/definitely/not/a/kubeconfig"));
    }

    #[tokio::test]
    async fn no_path_and_no_environment_resolves_to_none() {
        let resolved = resolve_with_env(None, None, &cluster_env(None, None))
            .await
            .unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn one_sided_environment_is_not_detected() {
        let resolved = resolve_with_env(None, None, &cluster_env(Some("10.96.0.1"), None))
            .await
            .unwrap();
        assert!(resolved.is_none());

        let resolved = resolve_with_env(None, None, &cluster_env(None, Some("443")))
            .await
            .unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn ambient_config_failure_is_fatal() {
        // The environment claims in-cluster, but no service account is
        // mounted here, so building the configuration must fail rather than
        // fall through to a partial handle.
        let err = resolve_with_env(None, None, &cluster_env(Some("10.96.0.1"), Some("443")))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InCluster(_)));
    }

    #[tokio::test]
    async fn valid_kubeconfig_path_builds_a_client() {
        let cfgraw = r#"
        apiVersion: v1
        kind: Config
        clusters:
        - cluster:
            server: https://10.0.0.1:6443
            insecure-skip-tls-verify: true
          name: test
        contexts:
        - context:
            cluster: test
            user: admin@test
          name: test
        current-context: test
        preferences: {}
        users:
        - name: admin@test
          user:
            token: abc
        "#;
        let file = tempfile::NamedTempFile::new().expect("create config tempfile");
        std::fs::write(file.path(), cfgraw).unwrap();

        let resolved = resolve_with_env(Some(file.path()), None, &cluster_env(None, None))
            .await
            .unwrap();
        assert!(resolved.is_some());
    }
}
