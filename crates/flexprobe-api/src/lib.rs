//! Analytics platform HTTP transport for flexprobe.
//!
//! This crate is transport only: it moves requests and raw responses across
//! the wire and reports each call's HTTP status and body verbatim. Success
//! classification (which statuses count as success for which endpoint) is the
//! orchestrator's job, so every caller sees exactly what the platform sent.
//!
//! The [`AnalyticsApi`] trait is the seam the orchestrator programs against;
//! [`HttpAnalyticsApi`] is the production implementation.

mod error;
mod http;
mod types;

pub use error::ApiError;
pub use http::HttpAnalyticsApi;
pub use types::{AnalyticsApi, ApiResponse};
