mod campaigns_config;
mod database_config;
mod delivery_config;
mod http_config;
mod ingestion_config;
mod orchestrator_config;
mod raw_config;

pub use self::{
    campaigns_config::CampaignsConfig,
    database_config::DatabaseConfig,
    delivery_config::{DeliveryConfig, SecretKeyConfig},
    http_config::{HttpClientConfig, HttpConfig},
    ingestion_config::IngestionConfig,
    orchestrator_config::OrchestratorConfig,
    raw_config::RawConfig,
};

/// Main server config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Version of the Campaigner binary.
    pub version: String,
    /// Configuration for the outbound HTTP functionality.
    pub http: HttpConfig,
    /// Configuration for the orchestration backend.
    pub orchestrator: OrchestratorConfig,
    /// Configuration for the fired delivery jobs.
    pub delivery: DeliveryConfig,
    /// Configuration for the campaigns.
    pub campaigns: CampaignsConfig,
    /// Configuration for the periodic records ingestion worker, if enabled.
    pub ingestion: Option<IngestionConfig>,
}

impl From<RawConfig> for Config {
    fn from(raw_config: RawConfig) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            http: raw_config.http,
            orchestrator: raw_config.orchestrator,
            delivery: raw_config.delivery,
            campaigns: raw_config.campaigns,
            ingestion: raw_config.ingestion,
        }
    }
}
