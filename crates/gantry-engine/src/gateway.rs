//! Cluster gateway seam
//!
//! The engine only needs two and a half things from the remote resource
//! store: enumerate resources by label selector, delete one resource by
//! name, and submit a declared resource document. Discovery, addressing and
//! authentication live behind this trait, outside the engine.

use async_trait::async_trait;
use gantry_core::config::{ResolvedSelector, ResourceDocument};
use thiserror::Error;
use tracing::info;

/// Gateway error
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The kind is not served under the given API version
    #[error("Kind '{kind}' was not found in API version '{api_version}'")]
    UnknownKind { api_version: String, kind: String },

    /// Any remote API failure
    #[error("Remote API error: {0}")]
    Api(String),
}

/// A reference to one remote resource, as returned by a list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    /// Resource name
    pub name: String,
    /// Namespace, when the resource is namespaced
    pub namespace: Option<String>,
}

/// Operations the engine needs from the remote resource store.
#[async_trait]
pub trait ClusterGateway: Send + Sync {
    /// Enumerate resources of the given kind matching the selector.
    async fn list(
        &self,
        api_version: &str,
        kind: &str,
        namespace: Option<&str>,
        selector: &ResolvedSelector,
    ) -> Result<Vec<ResourceRef>, GatewayError>;

    /// Delete one resource by name.
    async fn delete(
        &self,
        api_version: &str,
        kind: &str,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<(), GatewayError>;

    /// Create or update a declared resource.
    async fn apply(&self, doc: &ResourceDocument) -> Result<(), GatewayError>;
}

/// Split an `apiVersion` string into its group and version parts.
/// `"v1"` is the core API (no group); `"batch/v1"` is group + version.
pub fn group_version(api_version: &str) -> (Option<&str>, &str) {
    match api_version.split_once('/') {
        Some((group, version)) => (Some(group), version),
        None => (None, api_version),
    }
}

/// Gateway stand-in for deployments without a wired cluster client: logs
/// every operation and succeeds, listing nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunGateway;

#[async_trait]
impl ClusterGateway for DryRunGateway {
    async fn list(
        &self,
        api_version: &str,
        kind: &str,
        namespace: Option<&str>,
        selector: &ResolvedSelector,
    ) -> Result<Vec<ResourceRef>, GatewayError> {
        info!(
            api_version,
            kind,
            namespace = namespace.unwrap_or(""),
            selector = %selector,
            "Dry-run list"
        );
        Ok(Vec::new())
    }

    async fn delete(
        &self,
        api_version: &str,
        kind: &str,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<(), GatewayError> {
        info!(
            api_version,
            kind,
            namespace = namespace.unwrap_or(""),
            name,
            "Dry-run delete"
        );
        Ok(())
    }

    async fn apply(&self, doc: &ResourceDocument) -> Result<(), GatewayError> {
        info!(
            api_version = doc.api_version,
            kind = doc.kind,
            name = doc.display_name(),
            "Dry-run apply"
        );
        Ok(())
    }
}
