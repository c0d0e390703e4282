use crate::config::DatabaseConfig;
use serde_derive::{Deserialize, Serialize};
use std::{
    fmt::{Debug, Formatter},
    path::PathBuf,
};
use url::Url;

/// Configuration for the periodic records ingestion worker.
#[derive(Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct IngestionConfig {
    /// Six-field cron schedule (with seconds) of the ingestion cycle.
    pub schedule: String,
    /// Path to the file with the source handles, one handle per line.
    pub sources_path: PathBuf,
    /// Base URL of the external records API.
    pub api_url: Url,
    /// Bearer token used to authenticate to the external records API.
    pub api_token: Option<String>,
    /// Maximum number of records fetched per handle and cycle, clamped to 5-100.
    pub page_size: u8,
    /// Database the records are stored in.
    pub db: DatabaseConfig,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            // Once a day at midnight.
            schedule: "0 0 0 * * *".to_string(),
            sources_path: PathBuf::from("/data/sources.txt"),
            api_url: Url::parse("https://api.twitter.com")
                .expect("Cannot parse ingestion API URL parameter."),
            api_token: None,
            page_size: 10,
            db: DatabaseConfig::default(),
        }
    }
}

impl Debug for IngestionConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestionConfig")
            .field("schedule", &self.schedule)
            .field("sources_path", &self.sources_path)
            .field("api_url", &self.api_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("page_size", &self.page_size)
            .field("db", &self.db)
            .finish()
    }
}
