//! Error handling in [`kubelift`][crate]
use std::path::PathBuf;

use thiserror::Error;

/// Possible errors when working with [`kubelift`][crate]
///
/// Every variant carries the underlying failure as its `source`, so the
/// apiserver's taxonomy (not-found, conflict, malformed body, auth) stays
/// matchable via [`kube::Error::Api`] on the wrapped error. Nothing is
/// retried or translated beyond the wrapping.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or parse the kubeconfig credentials file
    #[error("failed to load kubeconfig from {path:?}: {source}")]
    LoadKubeconfig {
        /// Path the kubeconfig was expected at
        path: PathBuf,
        /// Underlying loader failure
        #[source]
        source: kube::config::KubeconfigError,
    },

    /// Failed to construct a client from a loaded kubeconfig
    #[error("failed to build client from kubeconfig: {0}")]
    BuildClient(#[source] kube::Error),

    /// Failed to create a namespace
    #[error("failed to create namespace: {0}")]
    CreateNamespace(#[source] kube::Error),

    /// Failed to delete a namespace
    #[error("failed to delete namespace: {0}")]
    DeleteNamespace(#[source] kube::Error),

    /// Failed to create a deployment
    #[error("failed to create deployment: {0}")]
    CreateDeployment(#[source] kube::Error),

    /// Failed to delete a deployment
    #[error("failed to delete deployment: {0}")]
    DeleteDeployment(#[source] kube::Error),

    /// Failed to read a deployment
    #[error("failed to read deployment: {0}")]
    ReadDeployment(#[source] kube::Error),

    /// Failed to patch a deployment
    #[error("failed to patch deployment: {0}")]
    PatchDeployment(#[source] kube::Error),

    /// Failed to list pods in a namespace
    #[error("failed to list pods: {0}")]
    ListPods(#[source] kube::Error),

    /// Failed to write a manifest file
    #[error("failed to write manifest {path:?}: {source}")]
    WriteManifest {
        /// Path of the manifest being written
        path: PathBuf,
        /// Underlying io failure
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a manifest file
    #[error("failed to read manifest {path:?}: {source}")]
    ReadManifest {
        /// Path of the manifest being read
        path: PathBuf,
        /// Underlying io failure
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a manifest mapping as YAML
    #[error("failed to serialize manifest as YAML: {0}")]
    SerializeManifest(#[source] serde_yaml::Error),

    /// Failed to parse a manifest file as YAML
    #[error("failed to parse manifest {path:?} as YAML: {source}")]
    ParseManifest {
        /// Path of the manifest being parsed
        path: PathBuf,
        /// Underlying parse failure
        #[source]
        source: serde_yaml::Error,
    },

    /// A manifest mapping did not describe a valid Deployment
    #[error("manifest does not describe a Deployment: {0}")]
    InvalidManifest(#[source] serde_json::Error),

    /// A fetched Deployment carried no `spec.replicas`
    ///
    /// The apiserver defaults the field on create, so this indicates an
    /// object shape we refuse to guess a count for.
    #[error("deployment {name} in {namespace} reports no replica count")]
    ReplicasUnset {
        /// Deployment name
        name: String,
        /// Namespace the deployment was read from
        namespace: String,
    },
}

/// Convenient alias for `Result<T, kubelift::Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;
