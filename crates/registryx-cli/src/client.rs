//! HTTP client for the registryx API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::Instrument;

use registryx_core::source::paths;
use registryx_core::{
    Error, IndexCollection, ProjectList, ProjectSummaryReport, RegistrySource, Result,
    TeamResponse, WbsGraph, registry_span,
};

use crate::Config;

/// API client for the registry endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Creates a new API client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute http(s) URL or the
    /// HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        let parsed = Url::parse(&config.base_url)
            .map_err(|e| Error::InvalidInput(format!("invalid base URL '{}': {e}", config.base_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidInput(format!(
                "base URL must use http or https: '{}'",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::transport_with_source("failed to create HTTP client", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        })
    }

    /// The base URL requests are sent to, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T>(
        &self,
        operation: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let body = self.get_bytes(operation, path, query).await?;
        let decoded: Option<T> = serde_json::from_slice(&body).map_err(|e| {
            Error::serialization(format!("invalid {operation} response: {e}"))
        })?;
        Ok(decoded.unwrap_or_default())
    }

    async fn get_bytes(
        &self,
        operation: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<u8>> {
        let url = self.url(path);
        let span = registry_span(operation, &self.base_url);

        async move {
            let mut req = self.client.get(&url);
            if !query.is_empty() {
                req = req.query(query);
            }

            let response = req.send().await.map_err(|e| self.send_error(operation, e))?;
            let status = response.status();
            let body = response
                .bytes()
                .await
                .map_err(|e| self.send_error(operation, e))?;

            if status.is_success() {
                tracing::debug!(%status, bytes = body.len(), "registry response");
                Ok(body.to_vec())
            } else {
                tracing::warn!(%status, "registry returned an error");
                Err(service_error(status, &body))
            }
        }
        .instrument(span)
        .await
    }

    fn send_error(&self, operation: &'static str, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                operation,
                timeout: self.timeout,
            }
        } else {
            Error::transport_with_source(format!("{operation} request failed"), err)
        }
    }
}

#[async_trait]
impl RegistrySource for ApiClient {
    async fn build_index(&self) -> Result<()> {
        self.get_bytes("build index", paths::BUILD_INDEX, &[])
            .await
            .map(|_| ())
    }

    async fn fetch_index(&self) -> Result<IndexCollection> {
        self.get_json("fetch index", paths::INDEX, &[]).await
    }

    async fn list_projects(&self) -> Result<ProjectList> {
        self.get_json("list projects", paths::PROJECTS, &[]).await
    }

    async fn fetch_team(&self, project_id: &str) -> Result<TeamResponse> {
        self.get_json("fetch team", paths::TEAM, &[("project_id", project_id)])
            .await
    }

    async fn fetch_summary(&self) -> Result<ProjectSummaryReport> {
        self.get_json("fetch summary", paths::SUMMARY, &[]).await
    }

    async fn fetch_wbs(&self, project_id: &str) -> Result<WbsGraph> {
        self.get_json("fetch wbs", paths::WBS, &[("project_id", project_id)])
            .await
    }
}

/// Builds a service error, preferring a JSON `message` or `detail` field
/// over the raw body.
fn service_error(status: StatusCode, body: &[u8]) -> Error {
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "detail"].iter().find_map(|key| {
                value
                    .get(key)
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());

    Error::Service {
        status: status.as_u16(),
        message,
    }
}
