use crate::{
    campaigns::CampaignCreateParams, config::CampaignsConfig, error::Error as CampaignerError,
    scheduler::CronExt,
};
use anyhow::bail;
use croner::Cron;
use regex::Regex;
use serde_json::{Value as JsonValue, json};
use url::Url;

/// Maximum length of the campaign name: job names are limited to 52 characters and include a
/// `-` plus a 6 character suffix.
pub const MAX_CAMPAIGN_NAME_LENGTH: usize = 45;

/// Validated and normalized campaign, consumed by the job compiler.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignRequest {
    /// Campaign name (DNS-1123 label).
    pub name: String,
    /// Validated five-field cron expression.
    pub schedule: String,
    /// Absolute `http` or `https` URL the payload is delivered to.
    pub target_url: Url,
    /// Payload delivered on every firing.
    pub payload: JsonValue,
}

impl CampaignRequest {
    /// Validates and normalizes the raw campaign parameters. All failures are validation errors.
    pub fn try_from_params(
        params: CampaignCreateParams,
        config: &CampaignsConfig,
    ) -> anyhow::Result<Self> {
        let name = params.name.trim();
        if name.is_empty() {
            bail!(CampaignerError::validation("Campaign name cannot be empty."));
        }

        if name.len() > MAX_CAMPAIGN_NAME_LENGTH {
            bail!(CampaignerError::validation(format!(
                "Campaign name cannot be longer than {MAX_CAMPAIGN_NAME_LENGTH} characters."
            )));
        }

        let name_regex = Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$")?;
        if !name_regex.is_match(name) {
            bail!(CampaignerError::validation(
                "Campaign name should consist of lowercase alphanumeric characters or '-', and should start and end with an alphanumeric character.",
            ));
        }

        let schedule = params
            .schedule
            .as_deref()
            .map(str::trim)
            .unwrap_or(&config.default_schedule);
        let cron = Cron::parse_pattern(schedule).map_err(|err| {
            CampaignerError::validation(format!(
                "Campaign schedule `{schedule}` is not a valid cron expression: {err}"
            ))
        })?;

        let min_interval = cron.min_interval().map_err(|err| {
            CampaignerError::validation(format!(
                "Campaign schedule `{schedule}` is not a valid cron expression: {err}"
            ))
        })?;
        if min_interval < config.min_schedule_interval {
            bail!(CampaignerError::validation(format!(
                "Campaign schedule `{schedule}` fires every {}, but the minimum allowed interval is {}.",
                humantime::format_duration(min_interval),
                humantime::format_duration(config.min_schedule_interval)
            )));
        }

        let target_url = Url::parse(params.target_api_url.trim()).map_err(|err| {
            CampaignerError::validation(format!(
                "Campaign target API URL (`{}`) is not a valid absolute URL: {err}",
                params.target_api_url
            ))
        })?;
        if target_url.scheme() != "http" && target_url.scheme() != "https" {
            bail!(CampaignerError::validation(format!(
                "Campaign target API URL should use `http` or `https` scheme, but got `{}`.",
                target_url.scheme()
            )));
        }

        Ok(Self {
            name: name.to_string(),
            schedule: schedule.to_string(),
            target_url,
            payload: params.payload.unwrap_or_else(|| json!({})),
        })
    }
}
