use crate::{
    campaigns::CampaignCreateParams, error::Error as CampaignerError, orchestrator::JobsBackend,
    server::AppState,
};
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::{error, info};

/// Creates a campaign: validates it, compiles it into a recurring job and registers the job with
/// the orchestration backend. Responds with `{"message", "job_name"}` on success and with
/// `{"error"}` on failure. The status code only classifies the failure, clients should tell the
/// outcome apart by the presence of `job_name` in the body.
pub async fn campaigns_create<JB: JobsBackend>(
    state: web::Data<AppState<JB>>,
    body_params: web::Json<CampaignCreateParams>,
) -> Result<HttpResponse, CampaignerError> {
    let params = body_params.into_inner();
    let campaign_name = params.name.clone();
    match state.api.campaigns().create_campaign(params).await {
        Ok(job_id) => {
            info!(
                campaign.name = %campaign_name,
                job.id = %job_id,
                "Successfully scheduled campaign."
            );
            Ok(HttpResponse::Ok().json(json!({
                "message": "Campaign scheduled successfully",
                "job_name": job_id
            })))
        }
        Err(err) => {
            let err = CampaignerError::from(err);
            error!(
                campaign.name = %campaign_name,
                error.kind = ?err.kind(),
                "Failed to schedule campaign: {err:?}"
            );
            Err(err)
        }
    }
}
