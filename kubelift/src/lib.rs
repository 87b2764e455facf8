//! Namespace and Deployment lifecycle operations on top of the Kubernetes API
//!
//! This crate wraps a [`kube::Client`] with one method per lifecycle
//! operation: namespace create/delete, Deployment create/delete/read/scale/
//! patch, a Pod readiness snapshot, and a local YAML store for Deployment
//! manifests. Every method delegates directly to the apiserver; there is no
//! retry policy, caching, or reconciliation here.
//!
//! # Example
//!
//! ```rust,no_run
//! use kubelift::ClusterClient;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credentials at <base>/config/kubeconfig.yaml,
//!     // manifests under <base>/resource/apps.
//!     let cluster = ClusterClient::from_base_dir(".").await?;
//!
//!     cluster.create_namespace("staging").await?;
//!
//!     let path = cluster.write_manifest("nginx.yaml", &json!({
//!         "apiVersion": "apps/v1",
//!         "kind": "Deployment",
//!         "metadata": { "name": "nginx" },
//!         "spec": {
//!             "replicas": 2,
//!             "selector": { "matchLabels": { "app": "nginx" } },
//!             "template": {
//!                 "metadata": { "labels": { "app": "nginx" } },
//!                 "spec": {
//!                     "containers": [{ "name": "nginx", "image": "nginx:1.27" }]
//!                 }
//!             }
//!         }
//!     }))?;
//!     cluster.create_deployment_from_yaml("staging", &path).await?;
//!
//!     cluster.scale_deployment("nginx", "staging", 4).await?;
//!     assert_eq!(cluster.get_replicas("nginx", "staging").await?, 4);
//!
//!     if cluster.all_pods_running("staging").await? {
//!         println!("staging is up");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! For the underlying client, config, and typed resources, see:
//!
//! - [`kube::Client`] for the transport this crate delegates to
//! - [`kube::Config`] for the kubeconfig abstraction
//! - [k8s-openapi](https://docs.rs/k8s-openapi/*/k8s_openapi/) for the resource types

pub mod cluster;
pub mod error;
pub mod manifest;

#[doc(inline)] pub use cluster::ClusterClient;
#[doc(inline)] pub use error::{Error, Result};
#[doc(inline)] pub use manifest::ManifestStore;
