use crate::campaigns::{JobId, SecretRef};
use std::collections::BTreeMap;

/// Specification of the recurring job compiled from a campaign. Never mutated after it's built
/// by the compiler.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSpec {
    /// Unique name of the recurring job.
    pub job_id: JobId,
    /// Name of the campaign the job was compiled from.
    pub campaign_name: String,
    /// Five-field cron expression that drives the job firings.
    pub recurrence: String,
    /// Container image the job runs in.
    pub container_image: String,
    /// Command that decodes the embedded payload and delivers it.
    pub command: Vec<String>,
    /// Plain (non-sensitive) environment variables of the job.
    pub env: BTreeMap<String, String>,
    /// Name of the environment variable the delivery credential is bound to.
    pub secret_env_name: String,
    /// Delivery credential reference.
    pub secret_ref: SecretRef,
    /// Number of retries within a single firing (the recurrence provides the retry cadence).
    pub retries_per_firing: u32,
}
