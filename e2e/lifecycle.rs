use std::time::Duration;

use kubelift::ClusterClient;
use serde_json::json;
use tokio::time;
use tracing::info;

const NAMESPACE: &str = "kubelift-e2e";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let client = kube::Client::try_default().await?;
    let cluster = ClusterClient::new(client, std::env::temp_dir().join("kubelift-e2e"));

    info!("creating namespace {}", NAMESPACE);
    cluster.create_namespace(NAMESPACE).await?;

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
    let name = cluster.create_deployment_from_yaml(NAMESPACE, &path).await?;
    info!("created deployment {}", name);

    // snapshot polls until every pod reports Running
    time::timeout(Duration::from_secs(60), async {
        let mut interval = time::interval(Duration::from_secs(1));
        loop {
            interval.tick().await;
            if cluster.all_pods_running(NAMESPACE).await.unwrap_or(false) {
                break;
            }
        }
    })
    .await?;
    info!("all pods running");

    cluster.scale_deployment(&name, NAMESPACE, 2).await?;
    assert_eq!(cluster.get_replicas(&name, NAMESPACE).await?, 2);
    info!("scaled {} to 2 replicas", name);

    let stopped = cluster.stop_deployment(&name, NAMESPACE).await?;
    assert_eq!(stopped.spec.and_then(|s| s.replicas), Some(0));
    info!("stopped {}", name);

    let status = cluster.delete_deployment(&name, NAMESPACE).await?;
    info!("deleted deployment {}: {}", name, status);
    let status = cluster.delete_namespace(NAMESPACE).await?;
    info!("deleted namespace {}: {}", NAMESPACE, status);
    Ok(())
}
