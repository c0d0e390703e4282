use crate::{
    config::DatabaseConfig,
    ingestion::{IngestedRecord, RecordsStore},
};
use anyhow::Context;
use futures::future::BoxFuture;
use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use tracing::info;

/// Maximum number of connections in the pool, the ingestion cycle processes handles sequentially.
const MAX_CONNECTIONS: u32 = 2;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connects to the database the ingested records are stored in.
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let mut options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.username)
            .database(&config.name);
        if let Some(ref password) = config.password {
            options = options.password(password);
        }

        info!(
            db.host = %config.host,
            db.port = config.port,
            db.name = %config.name,
            "Connecting to records database."
        );
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .with_context(|| {
                format!(
                    "Cannot connect to records database ({}@{}:{}/{}).",
                    config.username, config.host, config.port, config.name
                )
            })?;

        Ok(Self { pool })
    }

    async fn create_records_table(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
CREATE TABLE IF NOT EXISTS records (
    id BIGSERIAL PRIMARY KEY,
    external_id BIGINT NOT NULL UNIQUE,
    handle VARCHAR(50) NOT NULL,
    text TEXT NOT NULL,
    created_at TIMESTAMPTZ,
    collected_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
)"#,
        )
        .execute(&self.pool)
        .await
        .context("Cannot create records table.")?;

        Ok(())
    }

    async fn insert_records_batch(&self, records: &[IngestedRecord]) -> anyhow::Result<u64> {
        let mut transaction = self.pool.begin().await?;
        let mut inserted = 0;
        for record in records {
            inserted += sqlx::query(
                r#"
INSERT INTO records (external_id, handle, text, created_at)
VALUES ($1, $2, $3, $4)
ON CONFLICT (external_id) DO NOTHING"#,
            )
            .bind(record.external_id)
            .bind(&record.handle)
            .bind(&record.text)
            .bind(record.created_at)
            .execute(&mut *transaction)
            .await
            .with_context(|| format!("Cannot store record ({}).", record.external_id))?
            .rows_affected();
        }
        transaction.commit().await?;

        Ok(inserted)
    }
}

impl RecordsStore for Database {
    fn ensure_schema(&self) -> BoxFuture<'_, anyhow::Result<()>> {
        Box::pin(self.create_records_table())
    }

    fn insert_records<'a>(
        &'a self,
        records: &'a [IngestedRecord],
    ) -> BoxFuture<'a, anyhow::Result<u64>> {
        Box::pin(self.insert_records_batch(records))
    }
}
