//! Namespace and Deployment lifecycle operations against one cluster.
use std::path::{Path, PathBuf};

use either::Either;
use k8s_openapi::{
    api::{
        apps::v1::Deployment,
        core::v1::{Namespace, Pod},
    },
    apimachinery::pkg::apis::meta::v1::ObjectMeta,
};
use kube::{
    api::{Api, DeleteParams, ListParams, Patch, PatchParams, PostParams},
    config::{KubeConfigOptions, Kubeconfig},
    core::response::{Status, StatusSummary},
    Client, Config, ResourceExt,
};
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    manifest::{self, ManifestStore},
    Error, Result,
};

/// Kubeconfig location relative to the base directory
const KUBECONFIG_FILE: &str = "config/kubeconfig.yaml";
/// Manifest store location relative to the base directory
const MANIFEST_DIR: &str = "resource/apps";

/// Client for Namespace and Deployment lifecycle operations on one cluster.
///
/// Every method is a single delegation to the apiserver (the scale path is a
/// read then a patch). Nothing is retried, cached, or reconciled here; errors
/// propagate to the caller wrapped in [`Error`] with the transport failure as
/// their source.
#[derive(Clone)]
pub struct ClusterClient {
    client: Client,
    manifests: ManifestStore,
}

impl ClusterClient {
    /// Wrap an existing [`Client`], storing manifests under `manifest_root`.
    ///
    /// The handle is owned by the caller, so tests can pass a mocked service
    /// and binaries can share one client across components.
    pub fn new(client: Client, manifest_root: impl Into<PathBuf>) -> Self {
        Self {
            client,
            manifests: ManifestStore::new(manifest_root),
        }
    }

    /// Construct from the conventional layout under `base`:
    /// credentials at `config/kubeconfig.yaml`, manifests under
    /// `resource/apps`.
    ///
    /// Fails if the kubeconfig is missing or malformed, or if a client
    /// cannot be built from it.
    pub async fn from_base_dir(base: impl AsRef<Path>) -> Result<Self> {
        let base = base.as_ref();
        let path = base.join(KUBECONFIG_FILE);
        debug!("loading kubeconfig from {}", path.display());
        let kubeconfig = Kubeconfig::read_from(&path).map_err(|source| Error::LoadKubeconfig {
            path: path.clone(),
            source,
        })?;
        let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(|source| Error::LoadKubeconfig { path, source })?;
        let client = Client::try_from(config).map_err(Error::BuildClient)?;
        Ok(Self::new(client, base.join(MANIFEST_DIR)))
    }

    /// The manifest store backing [`write_manifest`](Self::write_manifest).
    pub fn manifests(&self) -> &ManifestStore {
        &self.manifests
    }

    /// Write `manifest` as a YAML file named `file_name` in the manifest
    /// store and return its absolute path.
    ///
    /// A repeated `file_name` silently overwrites the previous manifest.
    pub fn write_manifest(&self, file_name: &str, manifest: &Value) -> Result<PathBuf> {
        self.manifests.write(file_name, manifest)
    }

    /// Create a namespace and return its name.
    pub async fn create_namespace(&self, namespace: &str) -> Result<String> {
        let ns = Namespace {
            metadata: ObjectMeta {
                name: Some(namespace.to_owned()),
                ..Default::default()
            },
            ..Default::default()
        };
        let created = self
            .namespaces()
            .create(&PostParams::default(), &ns)
            .await
            .map_err(Error::CreateNamespace)?;
        Ok(created.name_any())
    }

    /// Delete a namespace and return its termination status string.
    ///
    /// The apiserver answers with either the terminating object or a
    /// [`Status`]; both are projected to the status string (the object's
    /// `status.phase`, normally `Terminating`).
    pub async fn delete_namespace(&self, namespace: &str) -> Result<String> {
        let res = self
            .namespaces()
            .delete(namespace, &DeleteParams::default())
            .await
            .map_err(Error::DeleteNamespace)?;
        Ok(match res {
            Either::Left(ns) => ns.status.and_then(|s| s.phase).unwrap_or_default(),
            Either::Right(status) => status_string(status),
        })
    }

    /// Create a Deployment from a manifest mapping and return its name.
    ///
    /// The mapping must describe a complete Deployment (`apiVersion`, `kind`,
    /// `metadata`, `spec`).
    pub async fn create_deployment(&self, namespace: &str, manifest: &Value) -> Result<String> {
        let deployment: Deployment =
            serde_json::from_value(manifest.clone()).map_err(Error::InvalidManifest)?;
        let created = self
            .deployments(namespace)
            .create(&PostParams::default(), &deployment)
            .await
            .map_err(Error::CreateDeployment)?;
        Ok(created.name_any())
    }

    /// Create a Deployment from a YAML manifest file and return its name.
    pub async fn create_deployment_from_yaml(
        &self,
        namespace: &str,
        path: impl AsRef<Path>,
    ) -> Result<String> {
        let manifest = manifest::load(path)?;
        self.create_deployment(namespace, &manifest).await
    }

    /// Delete a Deployment and return its termination status string.
    pub async fn delete_deployment(&self, name: &str, namespace: &str) -> Result<String> {
        let res = self
            .deployments(namespace)
            .delete(name, &DeleteParams::default())
            .await
            .map_err(Error::DeleteDeployment)?;
        Ok(match res {
            // deletion initiated, object still being torn down
            Either::Left(_) => "Terminating".to_owned(),
            Either::Right(status) => status_string(status),
        })
    }

    /// Fetch the full Deployment object, unfiltered.
    pub async fn get_deployment(&self, name: &str, namespace: &str) -> Result<Deployment> {
        self.deployments(namespace)
            .get(name)
            .await
            .map_err(Error::ReadDeployment)
    }

    /// Desired replica count of a Deployment.
    pub async fn get_replicas(&self, name: &str, namespace: &str) -> Result<i32> {
        let deployment = self.get_deployment(name, namespace).await?;
        deployment
            .spec
            .and_then(|spec| spec.replicas)
            .ok_or_else(|| Error::ReplicasUnset {
                name: name.to_owned(),
                namespace: namespace.to_owned(),
            })
    }

    /// Set the desired replica count of a Deployment.
    ///
    /// Reads the current object and submits a merge patch carrying its
    /// `resourceVersion`, so a concurrent writer makes the apiserver reject
    /// this patch with a conflict instead of losing either update. Returns
    /// the patched object.
    pub async fn scale_deployment(
        &self,
        name: &str,
        namespace: &str,
        replicas: i32,
    ) -> Result<Deployment> {
        let current = self.get_deployment(name, namespace).await?;
        debug!("scaling {}/{} to {} replicas", namespace, name, replicas);
        let patch = json!({
            "metadata": { "resourceVersion": current.resource_version() },
            "spec": { "replicas": replicas }
        });
        self.deployments(namespace)
            .patch(name, &PatchParams::default(), &Patch::Merge(&patch))
            .await
            .map_err(Error::PatchDeployment)
    }

    /// Apply a partial update to a Deployment and return the patched object.
    ///
    /// `patch` is applied as a strategic merge patch.
    pub async fn patch_deployment(
        &self,
        name: &str,
        namespace: &str,
        patch: &Value,
    ) -> Result<Deployment> {
        self.deployments(namespace)
            .patch(name, &PatchParams::default(), &Patch::Strategic(patch))
            .await
            .map_err(Error::PatchDeployment)
    }

    /// Apply a YAML patch file to a Deployment and return the patched object.
    pub async fn patch_deployment_from_yaml(
        &self,
        name: &str,
        namespace: &str,
        path: impl AsRef<Path>,
    ) -> Result<Deployment> {
        let patch = manifest::load(path)?;
        self.patch_deployment(name, namespace, &patch).await
    }

    /// Stop a Deployment by scaling it to zero replicas.
    pub async fn stop_deployment(&self, name: &str, namespace: &str) -> Result<Deployment> {
        self.scale_deployment(name, namespace, 0).await
    }

    /// Whether every Pod currently observed in `namespace` reports phase
    /// `Running`.
    ///
    /// This is a point-in-time snapshot of one Pod list, not a watch: it can
    /// race with scheduling or teardown, and a namespace with zero Pods
    /// counts as ready. Callers needing rollout completion should compare
    /// observed and desired replicas instead.
    pub async fn all_pods_running(&self, namespace: &str) -> Result<bool> {
        let list = self
            .pods(namespace)
            .list(&ListParams::default())
            .await
            .map_err(Error::ListPods)?;
        let mut all_running = true;
        for pod in &list.items {
            let phase = pod
                .status
                .as_ref()
                .and_then(|s| s.phase.as_deref())
                .unwrap_or_default();
            debug!("pod {} phase {}", pod.name_any(), phase);
            if phase != "Running" {
                all_running = false;
            }
        }
        Ok(all_running)
    }

    fn namespaces(&self) -> Api<Namespace> {
        Api::all(self.client.clone())
    }

    fn deployments(&self, namespace: &str) -> Api<Deployment> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn pods(&self, namespace: &str) -> Api<Pod> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

fn status_string(status: Status) -> String {
    match status.status {
        Some(StatusSummary::Success) => "Success".to_owned(),
        Some(StatusSummary::Failure) => "Failure".to_owned(),
        None => String::new(),
    }
}
