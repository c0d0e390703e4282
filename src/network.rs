use crate::config::HttpClientConfig;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;

/// Network utilities.
#[derive(Clone)]
pub struct Network {
    pub http_client: ClientWithMiddleware,
}

impl Network {
    /// Creates a new `Network` instance.
    pub fn new(http_client: ClientWithMiddleware) -> Self {
        Self { http_client }
    }

    /// Creates a `Network` instance with the HTTP client that retries transient failures with
    /// exponential backoff, up to the configured number of times.
    pub fn create(config: &HttpClientConfig) -> anyhow::Result<Self> {
        let client = Self::client_builder(config).build()?;
        Ok(Self::new(Self::with_middleware(client, config.max_retries)))
    }

    /// Returns HTTP client builder with the configured timeouts.
    pub fn client_builder(config: &HttpClientConfig) -> reqwest::ClientBuilder {
        Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .connection_verbose(config.verbose)
    }

    /// Wraps HTTP client into tracing and, if `max_retries` is greater than zero, retry middleware.
    pub fn with_middleware(client: Client, max_retries: u32) -> ClientWithMiddleware {
        let builder = ClientBuilder::new(client).with(TracingMiddleware::default());
        if max_retries > 0 {
            let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);
            builder
                .with(RetryTransientMiddleware::new_with_policy(retry_policy))
                .build()
        } else {
            builder.build()
        }
    }
}
