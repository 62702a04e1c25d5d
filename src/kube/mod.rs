//! Kubernetes client module
//!
//! Connects to the API server and fetches packaging resources as generic
//! [`Resource`] snapshots for the poll loop.

use crate::models::PackagingResourceKind;
use crate::resources::Resource;
use crate::wait::ResourceSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use kube::core::{ApiResource, DynamicObject, GroupVersionKind, TypeMeta};
use kube::{Api, Client, Config};

/// Initialize and return a Kubernetes client
///
/// Uses the default kubeconfig loading strategy:
/// 1. In-cluster config (if running in a pod)
/// 2. KUBECONFIG environment variable
/// 3. ~/.kube/config
pub async fn create_client() -> Result<Client> {
    let config = Config::infer()
        .await
        .context("Failed to infer Kubernetes configuration")?;
    tracing::debug!("Connecting to {}", config.cluster_url);
    let client = Client::try_from(config).context("Failed to create Kubernetes client")?;
    Ok(client)
}

/// Build the dynamic API resource descriptor for a packaging kind
pub fn api_resource(kind: PackagingResourceKind) -> ApiResource {
    let (group, version) = kind
        .api_version()
        .split_once('/')
        .unwrap_or(("", kind.api_version()));
    let gvk = GroupVersionKind::gvk(group, version, kind.as_str());
    ApiResource::from_gvk_with_plural(&gvk, kind.plural())
}

/// Fetches one named packaging resource from the cluster
pub struct ClusterSource {
    api: Api<DynamicObject>,
    kind: PackagingResourceKind,
    namespace: String,
    name: String,
}

impl ClusterSource {
    pub fn new(client: Client, kind: PackagingResourceKind, namespace: &str, name: &str) -> Self {
        let api = Api::namespaced_with(client, namespace, &api_resource(kind));
        Self {
            api,
            kind,
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl ResourceSource for ClusterSource {
    fn describe(&self) -> String {
        format!(
            "{}/{} (namespace: {})",
            self.kind.as_str().to_lowercase(),
            self.name,
            self.namespace
        )
    }

    async fn fetch(&self) -> Result<Option<Resource>> {
        let Some(mut obj) = self
            .api
            .get_opt(&self.name)
            .await
            .with_context(|| format!("Failed to get {}", self.describe()))?
        else {
            return Ok(None);
        };

        // Some responses omit type information; fill it in from the request
        if obj.types.is_none() {
            obj.types = Some(TypeMeta {
                api_version: self.kind.api_version().to_string(),
                kind: self.kind.as_str().to_string(),
            });
        }

        let resource = Resource::from_dynamic(&obj)
            .with_context(|| format!("Failed to read {}", self.describe()))?;
        Ok(Some(resource))
    }
}
