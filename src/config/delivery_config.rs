use crate::campaigns::SecretRef;
use anyhow::bail;
use serde_derive::{Deserialize, Serialize};

/// Reference to a key inside an orchestrator-managed secret.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SecretKeyConfig {
    /// Name of the secret object.
    pub name: String,
    /// Key inside the secret object that holds the credential.
    pub key: String,
}

/// Configuration of the job that is fired on every campaign occurrence.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DeliveryConfig {
    /// Pinned container image that provides `sh`, `base64` and `curl`.
    pub image: String,
    /// Orchestrator-managed secret that holds the `x-api-key` credential.
    pub api_key_secret: Option<SecretKeyConfig>,
}

impl DeliveryConfig {
    /// Resolves the configured credential secret. Literal credentials aren't supported since
    /// they would end up in the stored job object.
    pub fn secret_ref(&self) -> anyhow::Result<SecretRef> {
        match self.api_key_secret {
            Some(ref secret) if secret.name.trim().is_empty() || secret.key.trim().is_empty() => {
                bail!(
                    "Delivery API key secret (`delivery.api_key_secret`) should have both name and key."
                )
            }
            Some(ref secret) => Ok(SecretRef {
                name: secret.name.clone(),
                key: secret.key.clone(),
            }),
            None => bail!(
                "Delivery API key secret is not configured, set `delivery.api_key_secret` to the secret name and key that hold the credential."
            ),
        }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            image: "curlimages/curl:8.11.1".to_string(),
            api_key_secret: None,
        }
    }
}
