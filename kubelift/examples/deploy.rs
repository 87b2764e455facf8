//! Example: deploy, scale, inspect, and delete a Deployment via [`ClusterClient`].

use kubelift::ClusterClient;
use serde_json::json;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let client = kube::Client::try_default().await?;
    let cluster = ClusterClient::new(client, std::env::temp_dir().join("kubelift-apps"));
    let namespace = std::env::var("NAMESPACE").unwrap_or_else(|_| "default".into());

    let path = cluster.write_manifest(
        "whoami.yaml",
        &json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": { "name": "whoami" },
            "spec": {
                "replicas": 1,
                "selector": { "matchLabels": { "app": "whoami" } },
                "template": {
                    "metadata": { "labels": { "app": "whoami" } },
                    "spec": {
                        "containers": [{ "name": "whoami", "image": "traefik/whoami:v1.10" }]
                    }
                }
            }
        }),
    )?;
    info!("wrote manifest to {}", path.display());

    let name = cluster.create_deployment_from_yaml(&namespace, &path).await?;
    info!("created deployment {}", name);

    cluster.scale_deployment(&name, &namespace, 3).await?;
    info!(
        "scaled {} to {} replicas",
        name,
        cluster.get_replicas(&name, &namespace).await?
    );

    if cluster.all_pods_running(&namespace).await? {
        info!("all pods in {} are running", namespace);
    }

    let status = cluster.delete_deployment(&name, &namespace).await?;
    info!("deleted {}: {}", name, status);
    Ok(())
}
