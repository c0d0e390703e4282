use crate::{error::Error as CampaignerError, orchestrator::JobsBackend, server::AppState};
use actix_web::{HttpResponse, web};
use anyhow::anyhow;
use std::ops::Deref;

pub async fn status_get<JB: JobsBackend>(
    state: web::Data<AppState<JB>>,
) -> Result<HttpResponse, CampaignerError> {
    state
        .status
        .read()
        .map(|status| HttpResponse::Ok().json(status.deref()))
        .map_err(|err| anyhow!("Failed to retrieve server status: {:?}.", err).into())
}

#[cfg(test)]
mod tests {
    use crate::{server::handlers::status_get, tests::mock_app_state};
    use actix_web::{body::MessageBody, web};
    use serde_json::json;

    #[actix_web::test]
    async fn can_return_status() -> anyhow::Result<()> {
        let response = status_get(web::Data::new(mock_app_state()?)).await?;
        assert_eq!(response.status(), 200);

        let body = response.into_body().try_into_bytes().unwrap();
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&body)?,
            json!({ "version": env!("CARGO_PKG_VERSION"), "level": "available" })
        );

        Ok(())
    }
}
