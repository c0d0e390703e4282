mod api_ext;
mod campaign_create_params;
mod campaign_request;
mod job_compiler;
mod job_id;
mod job_spec;
mod payload_codec;
mod secret_ref;

pub use self::{
    api_ext::CampaignsApi, campaign_create_params::CampaignCreateParams,
    campaign_request::CampaignRequest, job_compiler::JobCompiler, job_id::JobId,
    job_spec::JobSpec, payload_codec::PayloadCodec, secret_ref::SecretRef,
};
