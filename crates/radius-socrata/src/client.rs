//! SODA HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::{debug, instrument, trace};

use radius_core::error::{Error, InvalidInputError, UpstreamError};
use radius_core::record::{Record, parse_records};
use radius_core::{EndpointUrl, QuerySpec, RecordSource, Result};

use crate::error::transport;

/// Default bound on one fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying a Socrata application token.
const APP_TOKEN_HEADER: &str = "x-app-token";

/// Error body returned by SODA endpoints.
#[derive(Debug, Deserialize)]
struct SodaErrorResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for one SODA resource.
#[derive(Debug, Clone)]
pub struct SocrataClient {
    client: reqwest::Client,
    endpoint: EndpointUrl,
}

impl SocrataClient {
    /// Create a client with the default timeout and no app token.
    pub fn new(endpoint: EndpointUrl) -> Result<Self> {
        Self::with_options(endpoint, DEFAULT_FETCH_TIMEOUT, None)
    }

    /// Create a client with an explicit timeout and optional app token.
    pub fn with_options(
        endpoint: EndpointUrl,
        timeout: Duration,
        app_token: Option<&str>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = app_token {
            let value = HeaderValue::from_str(token).map_err(|e| InvalidInputError::AppToken {
                reason: e.to_string(),
            })?;
            headers.insert(APP_TOKEN_HEADER, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("radius-watch/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(transport)?;

        Ok(Self { client, endpoint })
    }

    /// Returns the endpoint this client queries.
    pub fn endpoint(&self) -> &EndpointUrl {
        &self.endpoint
    }

    /// Turn a non-success response into an upstream error.
    async fn upstream_error(response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let message = match response.json::<SodaErrorResponse>().await {
            Ok(SodaErrorResponse {
                message: Some(message),
                code,
            }) => Some(match code {
                Some(code) => format!("[{}] {}", code, message),
                None => message,
            }),
            _ => None,
        };
        Error::Upstream(UpstreamError::new(status, message))
    }
}

#[async_trait]
impl RecordSource for SocrataClient {
    #[instrument(
        skip(self, query),
        fields(dataset = self.endpoint.dataset_id().unwrap_or("?"), limit = query.limit)
    )]
    async fn try_fetch(&self, query: &QuerySpec) -> Result<Vec<Record>> {
        debug!(endpoint = %self.endpoint, "SODA query");
        trace!(filter = %query.filter_clause, order = %query.order_clause, "query parameters");

        let response = self
            .client
            .get(self.endpoint.as_url().clone())
            .query(&query.params())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        trace!(status = %status, "SODA response");

        if !status.is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let body = response.bytes().await.map_err(transport)?;
        let records = parse_records(&body).map_err(|e| Error::Decode {
            message: e.to_string(),
        })?;

        debug!(count = records.len(), "fetched records");
        Ok(records)
    }
}
