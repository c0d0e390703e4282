use crate::config::{
    CampaignsConfig, DeliveryConfig, HttpConfig, IngestionConfig, OrchestratorConfig,
};
use figment::{Figment, Metadata, Profile, Provider, providers, providers::Format, value};
use serde_derive::{Deserialize, Serialize};

/// Raw configuration structure that is used to read the configuration from the file.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RawConfig {
    /// Defines a TCP port to listen on.
    pub port: u16,
    /// Configuration for the outbound HTTP functionality.
    pub http: HttpConfig,
    /// Configuration for the orchestration backend.
    pub orchestrator: OrchestratorConfig,
    /// Configuration for the fired delivery jobs.
    pub delivery: DeliveryConfig,
    /// Configuration for the campaigns.
    pub campaigns: CampaignsConfig,
    /// Configuration for the periodic records ingestion worker.
    pub ingestion: Option<IngestionConfig>,
}

impl RawConfig {
    /// Reads the configuration from the file (TOML) and merges it with the default values and
    /// `CAMPAIGNER_`-prefixed environment variables.
    pub fn read_from_file(path: &str) -> anyhow::Result<Self> {
        Ok(Figment::from(RawConfig::default())
            .merge(providers::Toml::file(path))
            .merge(providers::Env::prefixed("CAMPAIGNER_").split("__"))
            .extract()?)
    }
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            port: 7070,
            http: HttpConfig::default(),
            orchestrator: OrchestratorConfig::default(),
            delivery: DeliveryConfig::default(),
            campaigns: CampaignsConfig::default(),
            ingestion: None,
        }
    }
}

impl Provider for RawConfig {
    fn metadata(&self) -> Metadata {
        Metadata::named("Campaigner main configuration")
    }

    fn data(&self) -> Result<value::Map<Profile, value::Dict>, figment::Error> {
        providers::Serialized::defaults(Self::default()).data()
    }
}
