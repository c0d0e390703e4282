use crate::{config::IngestionConfig, ingestion::IngestedRecord};
use anyhow::{Context, bail};
use reqwest::StatusCode;
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};
use serde::Deserialize;
use serde_with::serde_as;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use url::Url;

/// Minimum and maximum number of records the source API returns per page.
const PAGE_SIZE_RANGE: (u8, u8) = (5, 100);

#[derive(Deserialize)]
struct ApiResponse<T> {
    data: Option<T>,
}

#[derive(Deserialize)]
struct ApiAccount {
    id: String,
}

#[serde_as]
#[derive(Deserialize)]
struct ApiRecord {
    id: String,
    text: String,
    #[serde_as(as = "Option<Rfc3339>")]
    created_at: Option<OffsetDateTime>,
}

/// Client for the external records API (Twitter API v2 compatible).
pub struct RecordsApi {
    http_client: ClientWithMiddleware,
    api_url: Url,
    api_token: Option<String>,
    page_size: u8,
}

impl RecordsApi {
    /// Creates API client, `http_client` is expected to retry transient failures.
    pub fn new(http_client: ClientWithMiddleware, config: &IngestionConfig) -> Self {
        Self {
            http_client,
            api_url: config.api_url.clone(),
            api_token: config.api_token.clone(),
            page_size: config.page_size.clamp(PAGE_SIZE_RANGE.0, PAGE_SIZE_RANGE.1),
        }
    }

    /// Resolves the handle to the account ID. Returns `None` if the account doesn't exist.
    pub async fn resolve_account(&self, handle: &str) -> anyhow::Result<Option<String>> {
        let url = self
            .api_url
            .join(&format!("2/users/by/username/{handle}"))
            .with_context(|| format!("Cannot build account URL ({handle})."))?;
        let response = self
            .authenticate(self.http_client.get(url))
            .send()
            .await
            .with_context(|| format!("Cannot resolve account ({handle})."))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            bail!(
                "Failed to resolve account ({handle}, {status}): {}",
                response.text().await?
            );
        }

        let account: ApiResponse<ApiAccount> = response
            .json()
            .await
            .with_context(|| format!("Cannot deserialize account ({handle})."))?;
        Ok(account.data.map(|account| account.id))
    }

    /// Fetches the latest page of records of the specified account.
    pub async fn fetch_latest(
        &self,
        handle: &str,
        account_id: &str,
    ) -> anyhow::Result<Vec<IngestedRecord>> {
        let mut url = self
            .api_url
            .join(&format!("2/users/{account_id}/tweets"))
            .with_context(|| format!("Cannot build records URL ({handle})."))?;
        url.query_pairs_mut()
            .append_pair("max_results", &self.page_size.to_string())
            .append_pair("tweet.fields", "created_at,text");

        let response = self
            .authenticate(self.http_client.get(url))
            .send()
            .await
            .with_context(|| format!("Cannot fetch records ({handle})."))?;

        let status = response.status();
        if !status.is_success() {
            bail!(
                "Failed to fetch records ({handle}, {status}): {}",
                response.text().await?
            );
        }

        let records: ApiResponse<Vec<ApiRecord>> = response
            .json()
            .await
            .with_context(|| format!("Cannot deserialize records ({handle})."))?;
        records
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|record| {
                Ok(IngestedRecord {
                    external_id: record.id.parse().with_context(|| {
                        format!("Invalid record ID ({handle}): {}", record.id)
                    })?,
                    handle: handle.to_string(),
                    text: record.text,
                    created_at: record.created_at,
                })
            })
            .collect()
    }

    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        match self.api_token {
            Some(ref token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RecordsApi;
    use crate::{config::IngestionConfig, ingestion::IngestedRecord, network::tests::mock_network};
    use httpmock::MockServer;
    use serde_json::json;
    use time::macros::datetime;
    use url::Url;

    fn mock_records_api(server: &MockServer) -> anyhow::Result<RecordsApi> {
        Ok(RecordsApi::new(
            mock_network()?.http_client,
            &IngestionConfig {
                api_url: Url::parse(&server.base_url())?,
                api_token: Some("t0ken".to_string()),
                ..Default::default()
            },
        ))
    }

    #[tokio::test]
    async fn can_resolve_account() -> anyhow::Result<()> {
        let server = MockServer::start();
        let account_mock = server.mock(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/2/users/by/username/acme")
                .header("Authorization", "Bearer t0ken");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({ "data": { "id": "2244994945", "name": "Acme", "username": "acme" } }));
        });

        assert_eq!(
            mock_records_api(&server)?.resolve_account("acme").await?,
            Some("2244994945".to_string())
        );
        account_mock.assert();

        Ok(())
    }

    #[tokio::test]
    async fn returns_none_for_unknown_accounts() -> anyhow::Result<()> {
        let server = MockServer::start();
        let missing_mock = server.mock(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/2/users/by/username/ghost");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({ "errors": [{ "detail": "Could not find user with username: [ghost]." }] }));
        });
        let not_found_mock = server.mock(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/2/users/by/username/gone");
            then.status(404);
        });

        let api = mock_records_api(&server)?;
        assert_eq!(api.resolve_account("ghost").await?, None);
        assert_eq!(api.resolve_account("gone").await?, None);
        missing_mock.assert();
        not_found_mock.assert();

        Ok(())
    }

    #[tokio::test]
    async fn can_fetch_latest_records() -> anyhow::Result<()> {
        let server = MockServer::start();
        let records_mock = server.mock(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/2/users/2244994945/tweets")
                .query_param("max_results", "10")
                .query_param("tweet.fields", "created_at,text");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "data": [
                        { "id": "1460323737035677698", "text": "Spring sale!", "created_at": "2024-03-01T10:00:00.000Z" },
                        { "id": "1460323737035677699", "text": "No date" }
                    ],
                    "meta": { "result_count": 2 }
                }));
        });

        assert_eq!(
            mock_records_api(&server)?
                .fetch_latest("acme", "2244994945")
                .await?,
            vec![
                IngestedRecord {
                    external_id: 1460323737035677698,
                    handle: "acme".to_string(),
                    text: "Spring sale!".to_string(),
                    created_at: Some(datetime!(2024-03-01 10:00:00 UTC)),
                },
                IngestedRecord {
                    external_id: 1460323737035677699,
                    handle: "acme".to_string(),
                    text: "No date".to_string(),
                    created_at: None,
                }
            ]
        );
        records_mock.assert();

        Ok(())
    }

    #[tokio::test]
    async fn returns_empty_page_without_data() -> anyhow::Result<()> {
        let server = MockServer::start();
        let records_mock = server.mock(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/2/users/2244994945/tweets");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({ "meta": { "result_count": 0 } }));
        });

        assert!(
            mock_records_api(&server)?
                .fetch_latest("acme", "2244994945")
                .await?
                .is_empty()
        );
        records_mock.assert();

        Ok(())
    }

    #[tokio::test]
    async fn fails_for_unsuccessful_responses() -> anyhow::Result<()> {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/2/users/2244994945/tweets");
            then.status(401).body("Unauthorized");
        });

        let err = mock_records_api(&server)?
            .fetch_latest("acme", "2244994945")
            .await
            .expect_err("request should fail");
        assert_eq!(
            err.to_string(),
            "Failed to fetch records (acme, 401 Unauthorized): Unauthorized"
        );

        Ok(())
    }
}
