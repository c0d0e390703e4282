use crate::{
    campaigns::JobSpec,
    config::{HttpClientConfig, OrchestratorConfig},
    network::Network,
    orchestrator::{BackendError, JobsBackend},
};
use anyhow::{Context, anyhow};
use futures::future::BoxFuture;
use reqwest::{Certificate, StatusCode};
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use serde_json::{Value as JsonValue, json};
use std::path::PathBuf;
use tracing::{debug, warn};
use url::Url;

/// Name of the container that delivers the campaign payload.
const JOB_CONTAINER_NAME: &str = "campaign-job";

/// Label that marks all resources created by Campaigner.
const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";

/// Label that links resources with the campaign they were created for.
const CAMPAIGN_LABEL: &str = "campaigner/campaign";

/// Subset of the Kubernetes `Status` object returned for failed requests.
#[derive(Deserialize)]
struct KubernetesStatus {
    message: Option<String>,
}

/// Registers recurring jobs as `batch/v1` `CronJob` resources through the Kubernetes REST API.
#[derive(Clone)]
pub struct KubernetesBackend {
    http_client: ClientWithMiddleware,
    api_url: Url,
    namespace: String,
    token_path: Option<PathBuf>,
}

impl KubernetesBackend {
    /// Creates backend for the configured API server. Requests are never retried: a retried
    /// creation could register the same campaign twice.
    pub fn create(
        config: &OrchestratorConfig,
        http_config: &HttpClientConfig,
    ) -> anyhow::Result<Self> {
        let mut client_builder = Network::client_builder(http_config);
        if let Some(ref ca_cert_path) = config.ca_cert_path {
            if ca_cert_path.exists() {
                let ca_cert = std::fs::read(ca_cert_path).with_context(|| {
                    format!(
                        "Cannot read Kubernetes API server CA certificate ({}).",
                        ca_cert_path.display()
                    )
                })?;
                client_builder = client_builder.add_root_certificate(
                    Certificate::from_pem(&ca_cert)
                        .context("Cannot parse Kubernetes API server CA certificate.")?,
                );
            } else {
                debug!(
                    ca_cert_path = %ca_cert_path.display(),
                    "Kubernetes API server CA certificate doesn't exist, using system roots."
                );
            }
        }

        if config.accept_invalid_certs {
            warn!("Kubernetes API server certificate verification is disabled.");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            http_client: Network::with_middleware(client_builder.build()?, 0),
            api_url: config.api_url.clone(),
            namespace: config.namespace.clone(),
            token_path: config.token_path.clone(),
        })
    }

    /// Renders `CronJob` manifest for the specified job.
    pub fn render_manifest(spec: &JobSpec) -> JsonValue {
        let mut env = spec
            .env
            .iter()
            .map(|(name, value)| json!({ "name": name, "value": value }))
            .collect::<Vec<_>>();
        env.push(json!({
            "name": spec.secret_env_name,
            "valueFrom": {
                "secretKeyRef": { "name": spec.secret_ref.name, "key": spec.secret_ref.key }
            }
        }));

        let labels = json!({
            MANAGED_BY_LABEL: "campaigner",
            CAMPAIGN_LABEL: spec.campaign_name
        });

        json!({
            "apiVersion": "batch/v1",
            "kind": "CronJob",
            "metadata": { "name": spec.job_id, "labels": labels },
            "spec": {
                "schedule": spec.recurrence,
                "jobTemplate": {
                    "metadata": { "labels": labels },
                    "spec": {
                        "backoffLimit": spec.retries_per_firing,
                        "template": {
                            "metadata": { "labels": labels },
                            "spec": {
                                "restartPolicy": "Never",
                                "containers": [{
                                    "name": JOB_CONTAINER_NAME,
                                    "image": spec.container_image,
                                    "command": spec.command,
                                    "env": env
                                }]
                            }
                        }
                    }
                }
            }
        })
    }

    fn cronjobs_url(&self) -> String {
        format!(
            "{}apis/batch/v1/namespaces/{}/cronjobs",
            self.api_url, self.namespace
        )
    }

    /// Reads the bearer token, the file is re-read for every request since mounted service
    /// account tokens are rotated.
    async fn read_token(&self) -> Result<Option<String>, BackendError> {
        let Some(ref token_path) = self.token_path else {
            return Ok(None);
        };

        match tokio::fs::read_to_string(token_path).await {
            Ok(token) => Ok(Some(token.trim().to_string())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    token_path = %token_path.display(),
                    "Kubernetes API token doesn't exist, sending unauthenticated request."
                );
                Ok(None)
            }
            Err(err) => Err(BackendError::Unavailable(anyhow!(err).context(format!(
                "Cannot read Kubernetes API token ({}).",
                token_path.display()
            )))),
        }
    }

    async fn submit(&self, spec: &JobSpec) -> Result<(), BackendError> {
        let mut request = self
            .http_client
            .post(self.cronjobs_url())
            .json(&Self::render_manifest(spec));
        if let Some(token) = self.read_token().await? {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| {
            BackendError::Unavailable(
                anyhow!(err).context(format!("Cannot create a recurring job ({}).", spec.job_id)),
            )
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.map_err(|err| {
            BackendError::Unavailable(anyhow!(err).context(format!(
                "Cannot read response for a recurring job ({}).",
                spec.job_id
            )))
        })?;

        if matches!(
            status,
            StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
        ) {
            return Err(BackendError::Unavailable(anyhow!(
                "Kubernetes API server is unavailable ({status}): {body}"
            )));
        }

        let message = serde_json::from_str::<KubernetesStatus>(&body)
            .ok()
            .and_then(|status| status.message)
            .unwrap_or(body);
        Err(BackendError::Rejected {
            status: status.as_u16(),
            message: if message.trim().is_empty() {
                format!("Request failed with status {status}.")
            } else {
                message
            },
        })
    }
}

impl JobsBackend for KubernetesBackend {
    fn create_recurring_job<'a>(
        &'a self,
        spec: &'a JobSpec,
    ) -> BoxFuture<'a, Result<(), BackendError>> {
        Box::pin(self.submit(spec))
    }
}
