mod cron_ext;
mod scheduler_jobs;

pub use self::cron_ext::CronExt;
use crate::{
    ingestion::{RecordsIngestion, RecordsStore},
    scheduler::scheduler_jobs::RecordsIngestionJob,
};
use std::sync::Arc;
use tokio_cron_scheduler::JobScheduler;

/// The scheduler is responsible for scheduling and executing Campaigner background jobs.
pub struct Scheduler;
impl Scheduler {
    /// Starts the scheduler with the records ingestion job on the specified six-field schedule.
    pub async fn start<RS: RecordsStore>(
        ingestion: Arc<RecordsIngestion<RS>>,
        schedule: &str,
    ) -> anyhow::Result<JobScheduler> {
        let scheduler = JobScheduler::new().await?;
        scheduler
            .add(RecordsIngestionJob::create(ingestion, schedule)?)
            .await?;
        scheduler.start().await?;

        Ok(scheduler)
    }
}
