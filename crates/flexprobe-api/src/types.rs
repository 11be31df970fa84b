//! Transport-level types and the API seam.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiError;

/// Raw outcome of one HTTP call: status code and body, verbatim.
///
/// The transport does not judge success; callers apply the per-endpoint
/// status rules themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Seam in front of the analytics platform's three endpoints.
///
/// The production implementation is [`HttpAnalyticsApi`]; tests script a stub
/// against this trait.
///
/// [`HttpAnalyticsApi`]: crate::HttpAnalyticsApi
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    /// Invalidate the acceleration layer for the configured data source.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the call never produced a response.
    async fn reload_cache(&self) -> Result<ApiResponse, ApiError>;

    /// Submit an AFM execution; the body is passed through unmodified.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the call never produced a response.
    async fn execute_afm(&self, body: &Value) -> Result<ApiResponse, ApiError>;

    /// Fetch the result for a previously submitted execution.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the call never produced a response.
    async fn fetch_result(&self, result_id: &str) -> Result<ApiResponse, ApiError>;
}
