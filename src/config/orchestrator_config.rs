use serde_derive::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Default location of the service account token mounted into every in-cluster pod.
const IN_CLUSTER_TOKEN_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";

/// Default location of the cluster CA bundle mounted into every in-cluster pod.
const IN_CLUSTER_CA_CERT_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/ca.crt";

/// Configuration for the orchestration backend (Kubernetes API server) recurring jobs are
/// registered with.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OrchestratorConfig {
    /// Base URL of the Kubernetes API server.
    pub api_url: Url,
    /// Namespace recurring jobs are created in.
    pub namespace: String,
    /// Path to the file with the bearer token used to authenticate to the API server.
    pub token_path: Option<PathBuf>,
    /// Path to the PEM bundle used to verify the API server certificate.
    pub ca_cert_path: Option<PathBuf>,
    /// Skips API server certificate verification, only meant for local clusters.
    pub accept_invalid_certs: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse("https://kubernetes.default.svc")
                .expect("Cannot parse Kubernetes API URL parameter."),
            namespace: "default".to_string(),
            token_path: Some(PathBuf::from(IN_CLUSTER_TOKEN_PATH)),
            ca_cert_path: Some(PathBuf::from(IN_CLUSTER_CA_CERT_PATH)),
            accept_invalid_certs: false,
        }
    }
}
