use crate::ingestion::{RecordsApi, RecordsStore, SourceHandles};
use std::{path::PathBuf, time::Instant};
use tracing::{debug, error, info, warn};

/// Outcome of a single ingestion cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestionSummary {
    /// Number of handles the cycle processed.
    pub handles: usize,
    /// Number of handles skipped because of a failure.
    pub failed_handles: usize,
    /// Number of records received from the source API.
    pub fetched_records: usize,
    /// Number of records that weren't stored before.
    pub stored_records: u64,
}

/// Collects the latest records of every source handle and stores them.
pub struct RecordsIngestion<RS: RecordsStore> {
    sources_path: PathBuf,
    api: RecordsApi,
    store: RS,
}

impl<RS: RecordsStore> RecordsIngestion<RS> {
    pub fn new(sources_path: PathBuf, api: RecordsApi, store: RS) -> Self {
        Self {
            sources_path,
            api,
            store,
        }
    }

    /// Runs a single ingestion cycle. Failure for a single handle is logged and skipped.
    pub async fn run_cycle(&self) -> anyhow::Result<IngestionSummary> {
        let cycle_start = Instant::now();
        self.store.ensure_schema().await?;

        let handles = SourceHandles::load(&self.sources_path).await?;
        if handles.is_empty() {
            warn!(
                sources_path = %self.sources_path.display(),
                "No source handles found, skipping ingestion cycle."
            );
            return Ok(IngestionSummary::default());
        }

        let mut summary = IngestionSummary {
            handles: handles.len(),
            ..Default::default()
        };
        for handle in handles.iter() {
            match self.ingest_handle(handle).await {
                Ok((fetched, stored)) => {
                    summary.fetched_records += fetched;
                    summary.stored_records += stored;
                }
                Err(err) => {
                    summary.failed_handles += 1;
                    error!(handle, "Failed to ingest records: {err:?}");
                }
            }
        }

        info!(
            handles = summary.handles,
            failed_handles = summary.failed_handles,
            fetched_records = summary.fetched_records,
            stored_records = summary.stored_records,
            "Finished ingestion cycle ({} elapsed).",
            humantime::format_duration(cycle_start.elapsed())
        );

        Ok(summary)
    }

    async fn ingest_handle(&self, handle: &str) -> anyhow::Result<(usize, u64)> {
        let Some(account_id) = self.api.resolve_account(handle).await? else {
            warn!(handle, "Source account doesn't exist, skipping.");
            return Ok((0, 0));
        };

        let records = self.api.fetch_latest(handle, &account_id).await?;
        if records.is_empty() {
            debug!(handle, "Source account has no records, skipping.");
            return Ok((0, 0));
        }

        let stored = self.store.insert_records(&records).await?;
        debug!(
            handle,
            fetched = records.len(),
            stored,
            "Ingested source account records."
        );

        Ok((records.len(), stored))
    }
}
