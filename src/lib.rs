//! flexprobe - cached vs. uncached analytical query latency probe
//!
//! flexprobe demonstrates the performance difference between cached and
//! uncached analytical query execution against a FlexQuery-style data
//! platform. Each probe session drives three HTTP endpoints (cache
//! invalidation, AFM query submission, result retrieval), measures the
//! wall-clock duration of each call, classifies executions as cached or
//! uncached via an explicit cache-state machine, decodes results into flat
//! records, and keeps an append-only in-session measurement history.
//!
//! # Quick Start (CLI)
//!
//! ```bash
//! # Configure once
//! cat > flexprobe.toml <<TOML
//! hostname = "https://demo.cloud.gooddata.com"
//! workspace_id = "my-workspace"
//! data_source_id = "my-datasource"
//! TOML
//! export FLEXPROBE_TOKEN=...
//!
//! # Three cached cycles, reload, three uncached cycles
//! flexprobe demo
//!
//! # Or drive the pieces yourself
//! flexprobe query --count 3
//! flexprobe reload
//! flexprobe query --count 3
//! ```
//!
//! # Quick Start (Library)
//!
//! ```rust,no_run
//! use flexprobe::{Config, CliOverrides, HttpAnalyticsApi, Orchestrator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::discover(&CliOverrides::default())?;
//! let api = HttpAnalyticsApi::new_from_config(&config)?;
//! let mut orchestrator = Orchestrator::new(Box::new(api), config.load_request_body()?);
//!
//! orchestrator.run_reload_cache().await?;
//! let outcome = orchestrator.run_query().await?;
//! println!("{} rows in {:?} ms", outcome.rows.len(), outcome.timing.total_ms);
//! # Ok(())
//! # }
//! ```
//!
//! All measurement history lives in the [`Session`] owned by the
//! [`Orchestrator`] and is discarded when the session ends; nothing is
//! persisted.

pub mod cli;
pub mod exit_codes;
mod logging;

pub use exit_codes::ExitCode;

pub use flexprobe_api::{AnalyticsApi, ApiError, ApiResponse, HttpAnalyticsApi};
pub use flexprobe_config::{CliOverrides, Config, ConfigError, DashboardConfig};
pub use flexprobe_decode::{AnalyticalResponse, DecodeError, DecodedRow, Decoder};
pub use flexprobe_engine::{Orchestrator, QueryOutcome, dashboard};
pub use flexprobe_session::{
    CacheState, CacheStateMachine, DashboardLog, ExecutionTracker, LoadSample, LoadStage,
    QueryType, Session, TimingRecord, TimingSummary,
};
