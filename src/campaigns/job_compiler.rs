use crate::{
    campaigns::{CampaignRequest, JobId, JobSpec, PayloadCodec, SecretRef},
    error::Error as CampaignerError,
};
use std::collections::BTreeMap;

/// Path inside the job container the decoded payload is written to before delivery.
const PAYLOAD_PATH: &str = "/tmp/payload.json";

/// Name of the environment variable the delivery credential is bound to.
pub const API_KEY_ENV_VAR: &str = "API_KEY";

/// Name of the environment variable the delivery target URL is bound to.
pub const TARGET_URL_ENV_VAR: &str = "TARGET_API_URL";

/// Compiles validated campaigns into self-contained recurring job specifications.
#[derive(Clone)]
pub struct JobCompiler {
    image: String,
    secret_ref: SecretRef,
}

impl JobCompiler {
    /// Creates a compiler that builds jobs running in the specified image and authenticating
    /// deliveries with the specified credential.
    pub fn new(image: impl Into<String>, secret_ref: SecretRef) -> Self {
        Self {
            image: image.into(),
            secret_ref,
        }
    }

    /// Compiles the campaign into a job specification. The payload is embedded into the job
    /// command as an opaque token, the target URL and credential are passed via environment.
    pub fn compile(&self, request: &CampaignRequest, job_id: JobId) -> anyhow::Result<JobSpec> {
        let token = PayloadCodec::encode(&request.payload).map_err(|err| {
            CampaignerError::validation_with_root_cause(
                anyhow::Error::new(err).context("Campaign payload cannot be encoded."),
            )
        })?;

        Ok(JobSpec {
            job_id,
            campaign_name: request.name.clone(),
            recurrence: request.schedule.clone(),
            container_image: self.image.clone(),
            command: vec![
                "sh".to_string(),
                "-c".to_string(),
                Self::delivery_script(&token),
            ],
            env: BTreeMap::from([(
                TARGET_URL_ENV_VAR.to_string(),
                request.target_url.to_string(),
            )]),
            secret_env_name: API_KEY_ENV_VAR.to_string(),
            secret_ref: self.secret_ref.clone(),
            retries_per_firing: 0,
        })
    }

    /// Builds a single-line script that restores the payload from the token and posts it to the
    /// target. The token only contains base64 alphabet characters, so it needs no quoting.
    fn delivery_script(token: &str) -> String {
        format!(
            "echo {token} | base64 -d > {PAYLOAD_PATH} && curl -sS --fail -X POST -H 'Content-Type: application/json' -H \"x-api-key: ${API_KEY_ENV_VAR}\" --data-binary @{PAYLOAD_PATH} \"${TARGET_URL_ENV_VAR}\""
        )
    }
}
