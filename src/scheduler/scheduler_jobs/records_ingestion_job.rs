use crate::ingestion::{RecordsIngestion, RecordsStore};
use std::sync::Arc;
use tokio_cron_scheduler::Job;
use tracing::error;

/// The job executes on a regular interval to collect the latest records of all source handles.
pub(crate) struct RecordsIngestionJob;
impl RecordsIngestionJob {
    /// Creates a new `RecordsIngestionJob` job.
    pub fn create<RS: RecordsStore>(
        ingestion: Arc<RecordsIngestion<RS>>,
        schedule: &str,
    ) -> anyhow::Result<Job> {
        Ok(Job::new_async(schedule, move |_, _| {
            let ingestion = ingestion.clone();
            Box::pin(async move {
                if let Err(err) = ingestion.run_cycle().await {
                    error!("Failed to execute records ingestion job: {err:?}");
                }
            })
        })?)
    }
}
