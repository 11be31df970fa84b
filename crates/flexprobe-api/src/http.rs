//! `reqwest`-based implementation of the platform endpoints.

use async_trait::async_trait;
use flexprobe_config::Config;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::ApiError;
use crate::types::{AnalyticsApi, ApiResponse};

/// Connect timeout for the shared client.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport against a FlexQuery-style analytics platform.
///
/// One `reqwest::Client` per instance, TLS via rustls. There is no retry
/// layer: a failed call is surfaced immediately, and timeout policy beyond
/// the overall per-request cap is the client's default behavior.
pub struct HttpAnalyticsApi {
    client: Client,
    hostname: String,
    token: String,
    workspace_id: String,
    data_source_id: String,
    request_timeout: Duration,
}

impl HttpAnalyticsApi {
    /// Build the transport from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Misconfiguration`] if the HTTP client cannot be
    /// constructed.
    pub fn new_from_config(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .use_rustls_tls()
            .build()
            .map_err(|e| {
                ApiError::Misconfiguration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            hostname: config.hostname.clone(),
            token: config.token.clone(),
            workspace_id: config.workspace_id.clone(),
            data_source_id: config.data_source_id.clone(),
            request_timeout: config.request_timeout,
        })
    }

    fn reload_url(&self) -> String {
        format!(
            "{}/api/v1/actions/dataSources/{}/uploadNotification",
            self.hostname, self.data_source_id
        )
    }

    fn execute_url(&self) -> String {
        format!(
            "{}/api/v1/actions/workspaces/{}/execution/afm/execute",
            self.hostname, self.workspace_id
        )
    }

    fn result_url(&self, result_id: &str) -> String {
        format!(
            "{}/api/v1/actions/workspaces/{}/execution/afm/execute/result/{}",
            self.hostname, self.workspace_id, result_id
        )
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<ApiResponse, ApiError> {
        let response = request
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("{endpoint}: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("{endpoint}: failed to read body: {e}")))?;

        debug!(endpoint, status, body_bytes = body.len(), "API call returned");

        Ok(ApiResponse { status, body })
    }
}

#[async_trait]
impl AnalyticsApi for HttpAnalyticsApi {
    async fn reload_cache(&self) -> Result<ApiResponse, ApiError> {
        let url = self.reload_url();
        debug!(url = %url, "Requesting cache reload");

        let request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", self.bearer());

        self.send(request, "uploadNotification").await
    }

    async fn execute_afm(&self, body: &Value) -> Result<ApiResponse, ApiError> {
        let url = self.execute_url();
        debug!(url = %url, "Submitting AFM execution");

        let request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header("Authorization", self.bearer())
            .json(body);

        self.send(request, "afm/execute").await
    }

    async fn fetch_result(&self, result_id: &str) -> Result<ApiResponse, ApiError> {
        let url = self.result_url(result_id);
        debug!(url = %url, "Fetching execution result");

        let request = self.client.get(&url).header("Authorization", self.bearer());

        self.send(request, "afm/execute/result").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexprobe_config::Config;
    use std::path::PathBuf;

    fn test_config() -> Config {
        Config {
            hostname: "https://demo.cloud.example.com".to_string(),
            token: "tok-123".to_string(),
            workspace_id: "ws-9".to_string(),
            data_source_id: "ds-7".to_string(),
            request_body: PathBuf::from("request_body.json"),
            request_timeout: Duration::from_secs(30),
            dashboard: None,
        }
    }

    #[test]
    fn test_endpoint_urls() {
        let api = HttpAnalyticsApi::new_from_config(&test_config()).unwrap();

        assert_eq!(
            api.reload_url(),
            "https://demo.cloud.example.com/api/v1/actions/dataSources/ds-7/uploadNotification"
        );
        assert_eq!(
            api.execute_url(),
            "https://demo.cloud.example.com/api/v1/actions/workspaces/ws-9/execution/afm/execute"
        );
        assert_eq!(
            api.result_url("res-42"),
            "https://demo.cloud.example.com/api/v1/actions/workspaces/ws-9/execution/afm/execute/result/res-42"
        );
    }

    #[test]
    fn test_bearer_header_value() {
        let api = HttpAnalyticsApi::new_from_config(&test_config()).unwrap();
        assert_eq!(api.bearer(), "Bearer tok-123");
    }
}
