use crate::{
    api::Api,
    campaigns::JobSpec,
    error::Error as CampaignerError,
    orchestrator::{BackendError, JobsBackend},
};
use anyhow::bail;
use tracing::{error, info, warn};

/// API to submit compiled jobs to the orchestration backend.
pub struct OrchestratorApi<'a, JB: JobsBackend> {
    api: &'a Api<JB>,
}

impl<'a, JB: JobsBackend> OrchestratorApi<'a, JB> {
    /// Creates Orchestrator API.
    pub fn new(api: &'a Api<JB>) -> Self {
        Self { api }
    }

    /// Submits the job to the orchestration backend exactly once. Rejections are reported with
    /// the backend message kept verbatim.
    pub async fn submit(&self, spec: &JobSpec) -> anyhow::Result<()> {
        match self.api.jobs_backend.create_recurring_job(spec).await {
            Ok(()) => {
                info!(
                    job.id = %spec.job_id,
                    job.schedule = %spec.recurrence,
                    "Successfully registered recurring job."
                );
                Ok(())
            }
            Err(BackendError::Rejected { status, message }) => {
                warn!(
                    job.id = %spec.job_id,
                    status,
                    "Orchestration backend rejected recurring job: {message}"
                );
                bail!(CampaignerError::submission_rejected(message))
            }
            Err(BackendError::Unavailable(err)) => {
                error!(
                    job.id = %spec.job_id,
                    "Orchestration backend is unavailable: {err:?}"
                );
                bail!(CampaignerError::backend_unavailable(err))
            }
        }
    }
}

impl<JB: JobsBackend> Api<JB> {
    /// Returns an API to work with the orchestration backend.
    pub fn orchestrator(&self) -> OrchestratorApi<'_, JB> {
        OrchestratorApi::new(self)
    }
}
