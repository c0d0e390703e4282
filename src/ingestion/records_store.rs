use crate::ingestion::IngestedRecord;
use futures::future::BoxFuture;

/// Trait describing a destination for ingested records.
pub trait RecordsStore: Sync + Send + 'static {
    /// Creates the records table if it doesn't exist yet.
    fn ensure_schema(&self) -> BoxFuture<'_, anyhow::Result<()>>;

    /// Stores records skipping the ones that have been stored already, returns the number of
    /// newly stored records.
    fn insert_records<'a>(
        &'a self,
        records: &'a [IngestedRecord],
    ) -> BoxFuture<'a, anyhow::Result<u64>>;
}
