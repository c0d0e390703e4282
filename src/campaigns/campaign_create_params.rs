use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Parameters of the campaign creation request as received from the client.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CampaignCreateParams {
    /// Human label of the campaign, used as the job ID prefix.
    pub name: String,
    /// Five-field cron expression, defaults to the configured schedule when omitted.
    pub schedule: Option<String>,
    /// Absolute URL the payload is delivered to on every firing.
    pub target_api_url: String,
    /// Arbitrary JSON payload, defaults to an empty object when omitted.
    pub payload: Option<JsonValue>,
}

#[cfg(test)]
mod tests {
    use super::CampaignCreateParams;
    use serde_json::json;

    #[test]
    fn deserialization() -> anyhow::Result<()> {
        assert_eq!(
            serde_json::from_str::<CampaignCreateParams>(
                r#"{ "name": "promo", "target_api_url": "https://example.com/hook" }"#
            )?,
            CampaignCreateParams {
                name: "promo".to_string(),
                schedule: None,
                target_api_url: "https://example.com/hook".to_string(),
                payload: None,
            }
        );

        assert_eq!(
            serde_json::from_str::<CampaignCreateParams>(
                r#"{ "name": "promo", "schedule": "*/5 * * * *", "target_api_url": "https://example.com/hook", "payload": { "discount": 10 } }"#
            )?,
            CampaignCreateParams {
                name: "promo".to_string(),
                schedule: Some("*/5 * * * *".to_string()),
                target_api_url: "https://example.com/hook".to_string(),
                payload: Some(json!({ "discount": 10 })),
            }
        );

        assert!(
            serde_json::from_str::<CampaignCreateParams>(r#"{ "name": "promo" }"#).is_err()
        );
        assert!(
            serde_json::from_str::<CampaignCreateParams>(
                r#"{ "target_api_url": "https://example.com/hook" }"#
            )
            .is_err()
        );

        Ok(())
    }
}
