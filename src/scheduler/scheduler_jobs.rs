mod records_ingestion_job;

pub(crate) use self::records_ingestion_job::RecordsIngestionJob;
