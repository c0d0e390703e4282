use serde_derive::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::time::Duration;

/// Configuration for the campaigns.
#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CampaignsConfig {
    /// Five-field cron schedule used when a campaign doesn't specify one.
    pub default_schedule: String,
    /// The minimum interval allowed between two consequent campaign firings.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub min_schedule_interval: Duration,
}

impl Default for CampaignsConfig {
    fn default() -> Self {
        Self {
            // Once daily at midnight.
            default_schedule: "0 0 * * *".to_string(),
            min_schedule_interval: Duration::from_secs(60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CampaignsConfig;
    use insta::assert_toml_snapshot;
    use std::time::Duration;

    #[test]
    fn serialization_and_default() {
        assert_toml_snapshot!(CampaignsConfig::default(), @r###"
        default_schedule = '0 0 * * *'
        min_schedule_interval = 60000
        "###);
    }

    #[test]
    fn deserialization() -> anyhow::Result<()> {
        let config: CampaignsConfig = toml::from_str(
            r#"
        default_schedule = '0 12 * * 1-5'
        min_schedule_interval = 3600000
    "#,
        )?;

        assert_eq!(
            config,
            CampaignsConfig {
                default_schedule: "0 12 * * 1-5".to_string(),
                min_schedule_interval: Duration::from_secs(3600),
            }
        );

        Ok(())
    }
}
