mod app_state;
mod handlers;
mod status;

pub use self::app_state::AppState;
use crate::{
    api::Api, config::Config, error::Error as CampaignerError, orchestrator::KubernetesBackend,
};
use actix_web::{App, HttpServer, middleware, web};
use anyhow::Context;
use tracing::info;
use tracing_actix_web::TracingLogger;

#[actix_web::main]
pub async fn run(config: Config, http_port: u16) -> Result<(), anyhow::Error> {
    let jobs_backend = KubernetesBackend::create(&config.orchestrator, &config.http.client)?;
    let api = Api::new(config.clone(), jobs_backend)?;
    info!(
        orchestrator.url = %config.orchestrator.api_url,
        orchestrator.namespace = %config.orchestrator.namespace,
        "Campaigner is configured to register jobs with Kubernetes."
    );

    let http_server_url = format!("0.0.0.0:{http_port}");
    let state = web::Data::new(AppState::new(config, api));
    let http_server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::NormalizePath::trim())
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .app_data(json_config())
            .route(
                "/create_campaign",
                web::post().to(handlers::campaigns_create::<KubernetesBackend>),
            )
            .service(
                web::scope("/api")
                    .route(
                        "/status",
                        web::get().to(handlers::status_get::<KubernetesBackend>),
                    )
                    .service(web::scope("/scheduler").route(
                        "/parse_schedule",
                        web::post().to(handlers::scheduler_parse_schedule::<KubernetesBackend>),
                    )),
            )
    });

    let http_server = http_server
        .bind(&http_server_url)
        .with_context(|| format!("Failed to bind to {}.", &http_server_url))?;

    info!("Campaigner API server is available at http://{http_server_url}");

    http_server
        .run()
        .await
        .context("Failed to run Campaigner API server.")
}

/// JSON extractor configuration that reports malformed request bodies with the same envelope as
/// any other validation error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _| {
        CampaignerError::validation(format!("Invalid request body: {err}")).into()
    })
}

#[cfg(test)]
mod tests {
    use super::json_config;
    use crate::{
        orchestrator::tests::MockJobsBackend,
        server::handlers,
        tests::{mock_app_state_with_backend, mock_config},
    };
    use actix_web::{App, test, web};
    use serde_json::{Value as JsonValue, json};

    #[actix_web::test]
    async fn reports_malformed_bodies_as_validation_errors() -> anyhow::Result<()> {
        let backend = MockJobsBackend::new();
        let state = web::Data::new(mock_app_state_with_backend(
            mock_config()?,
            backend.clone(),
        )?);
        let app = test::init_service(
            App::new().app_data(state).app_data(json_config()).route(
                "/create_campaign",
                web::post().to(handlers::campaigns_create::<MockJobsBackend>),
            ),
        )
        .await;

        for body in [
            "{ not json",
            r#"{ "target_api_url": "https://example.com/hook" }"#,
            r#"{ "name": "promo" }"#,
        ] {
            let request = test::TestRequest::post()
                .uri("/create_campaign")
                .insert_header(("Content-Type", "application/json"))
                .set_payload(body)
                .to_request();
            let response = test::call_service(&app, request).await;
            assert_eq!(response.status(), 400, "{body}");

            let body: JsonValue = test::read_body_json(response).await;
            let error = body["error"].as_str().unwrap_or_default();
            assert!(error.starts_with("Invalid request body: "), "{error}");
            assert!(body.get("job_name").is_none());
        }

        assert!(backend.jobs().is_empty());

        Ok(())
    }

    #[actix_web::test]
    async fn can_create_campaign_over_http() -> anyhow::Result<()> {
        let backend = MockJobsBackend::new();
        let state = web::Data::new(mock_app_state_with_backend(
            mock_config()?,
            backend.clone(),
        )?);
        let app = test::init_service(
            App::new().app_data(state).app_data(json_config()).route(
                "/create_campaign",
                web::post().to(handlers::campaigns_create::<MockJobsBackend>),
            ),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/create_campaign")
            .set_json(json!({
                "name": "promo",
                "schedule": "*/5 * * * *",
                "target_api_url": "https://example.com/hook",
                "payload": { "discount": 10 }
            }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), 200);

        let body: JsonValue = test::read_body_json(response).await;
        assert_eq!(body["message"], "Campaign scheduled successfully");
        assert_eq!(
            body["job_name"].as_str(),
            backend.jobs().first().map(|job| &*job.job_id)
        );

        Ok(())
    }
}
