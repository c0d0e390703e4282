mod ingested_record;
mod records_api;
mod records_ingestion;
mod records_store;
mod source_handles;

pub use self::{
    ingested_record::IngestedRecord,
    records_api::RecordsApi,
    records_ingestion::{IngestionSummary, RecordsIngestion},
    records_store::RecordsStore,
    source_handles::SourceHandles,
};
use crate::{config::Config, database::Database, network::Network, scheduler::Scheduler};
use anyhow::{Context, anyhow};
use std::sync::Arc;
use tracing::{error, info};

/// Runs the periodic records ingestion worker until interrupted: one cycle runs right away, the
/// following ones on the configured schedule.
#[tokio::main]
pub async fn run(config: Config) -> anyhow::Result<()> {
    let ingestion_config = config
        .ingestion
        .ok_or_else(|| anyhow!("Records ingestion isn't configured (`[ingestion]`)."))?;

    let network = Network::create(&config.http.client)?;
    let database = Database::connect(&ingestion_config.db).await?;
    let ingestion = Arc::new(RecordsIngestion::new(
        ingestion_config.sources_path.clone(),
        RecordsApi::new(network.http_client, &ingestion_config),
        database,
    ));

    if let Err(err) = ingestion.run_cycle().await {
        error!("Failed to run initial ingestion cycle: {err:?}");
    }

    let mut scheduler = Scheduler::start(ingestion, &ingestion_config.schedule).await?;
    info!(
        schedule = %ingestion_config.schedule,
        "Records ingestion worker is running."
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal.")?;
    info!("Shutting down records ingestion worker.");

    scheduler.shutdown().await?;

    Ok(())
}
