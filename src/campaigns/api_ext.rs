use crate::{
    api::Api,
    campaigns::{CampaignCreateParams, CampaignRequest, JobId},
    orchestrator::JobsBackend,
};
use tracing::debug;

/// API to create campaigns.
pub struct CampaignsApi<'a, JB: JobsBackend> {
    api: &'a Api<JB>,
}

impl<'a, JB: JobsBackend> CampaignsApi<'a, JB> {
    /// Creates Campaigns API.
    pub fn new(api: &'a Api<JB>) -> Self {
        Self { api }
    }

    /// Validates the campaign, compiles it into a recurring job and submits the job to the
    /// orchestration backend. Nothing is submitted if validation or compilation fails.
    pub async fn create_campaign(&self, params: CampaignCreateParams) -> anyhow::Result<JobId> {
        let request = CampaignRequest::try_from_params(params, &self.api.config.campaigns)?;
        let job_id = JobId::allocate(&request.name)?;
        debug!(
            campaign.name = %request.name,
            job.id = %job_id,
            "Compiling campaign into a recurring job."
        );

        let spec = self.api.compiler.compile(&request, job_id)?;
        self.api.orchestrator().submit(&spec).await?;

        Ok(spec.job_id)
    }
}

impl<JB: JobsBackend> Api<JB> {
    /// Returns an API to work with campaigns.
    pub fn campaigns(&self) -> CampaignsApi<'_, JB> {
        CampaignsApi::new(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        campaigns::{CampaignCreateParams, PayloadCodec, SecretRef},
        error::{Error as CampaignerError, ErrorKind},
        orchestrator::tests::MockJobsBackend,
        tests::{mock_api_with_backend, mock_config},
    };
    use regex::Regex;
    use serde_json::json;

    fn mock_params() -> CampaignCreateParams {
        CampaignCreateParams {
            name: "promo".to_string(),
            schedule: Some("*/5 * * * *".to_string()),
            target_api_url: "https://example.com/hook".to_string(),
            payload: Some(json!({ "discount": 10 })),
        }
    }

    #[tokio::test]
    async fn can_create_campaign() -> anyhow::Result<()> {
        let backend = MockJobsBackend::new();
        let api = mock_api_with_backend(mock_config()?, backend.clone())?;

        let job_id = api.campaigns().create_campaign(mock_params()).await?;
        assert!(Regex::new("^promo-[0-9a-f]{6}$")?.is_match(&job_id));

        let jobs = backend.jobs();
        assert_eq!(jobs.len(), 1);

        let job = &jobs[0];
        assert_eq!(job.job_id, job_id);
        assert_eq!(job.campaign_name, "promo");
        assert_eq!(job.recurrence, "*/5 * * * *");
        assert_eq!(job.container_image, "curlimages/curl:8.11.1");
        assert_eq!(job.retries_per_firing, 0);
        assert_eq!(job.secret_env_name, "API_KEY");
        assert_eq!(
            job.secret_ref,
            SecretRef {
                name: "campaigns".to_string(),
                key: "api-key".to_string()
            }
        );
        assert_eq!(
            job.env.get("TARGET_API_URL").map(String::as_str),
            Some("https://example.com/hook")
        );

        let token = PayloadCodec::encode(&json!({ "discount": 10 }))?;
        assert!(job.command[2].starts_with(&format!("echo {token} | base64 -d")));

        Ok(())
    }

    #[tokio::test]
    async fn allocates_distinct_jobs_for_the_same_name() -> anyhow::Result<()> {
        let backend = MockJobsBackend::new();
        let api = mock_api_with_backend(mock_config()?, backend.clone())?;

        let first = api.campaigns().create_campaign(mock_params()).await?;
        let second = api.campaigns().create_campaign(mock_params()).await?;
        assert_ne!(first, second);
        assert_eq!(backend.jobs().len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn never_submits_invalid_campaigns() -> anyhow::Result<()> {
        let backend = MockJobsBackend::new();
        let api = mock_api_with_backend(mock_config()?, backend.clone())?;

        let err = CampaignerError::from(
            api.campaigns()
                .create_campaign(CampaignCreateParams {
                    schedule: Some("not a cron".to_string()),
                    ..mock_params()
                })
                .await
                .expect_err("campaign should be rejected"),
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(backend.jobs().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn propagates_backend_rejection() -> anyhow::Result<()> {
        let api = mock_api_with_backend(
            mock_config()?,
            MockJobsBackend::new_rejecting("admission webhook denied the request"),
        )?;

        let err = CampaignerError::from(
            api.campaigns()
                .create_campaign(mock_params())
                .await
                .expect_err("campaign should be rejected"),
        );
        assert_eq!(err.kind(), ErrorKind::SubmissionRejected);
        assert_eq!(err.to_string(), "admission webhook denied the request");

        Ok(())
    }
}
