use crate::{campaigns::JobSpec, orchestrator::BackendError};
use futures::future::BoxFuture;

/// Trait describing a facade for the orchestration backend recurring jobs are registered with.
pub trait JobsBackend: Sync + Send + 'static {
    /// Registers a recurring job. Called exactly once per job, the backend owns the job
    /// afterwards and is expected to reject jobs with names that already exist.
    fn create_recurring_job<'a>(
        &'a self,
        spec: &'a JobSpec,
    ) -> BoxFuture<'a, Result<(), BackendError>>;
}
