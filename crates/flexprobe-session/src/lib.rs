//! In-session state for flexprobe.
//!
//! Everything here is process-local, single-writer state scoped to one
//! interactive session: the append-only execution timing log, the cache-state
//! machine that classifies executions as cached or uncached, and the dashboard
//! load-time log. Nothing is persisted; session end discards all of it.

mod cache_state;
mod dashboard;
mod tracker;

pub use cache_state::{CacheState, CacheStateMachine, QueryType};
pub use dashboard::{DashboardLog, LoadSample, LoadStage};
pub use tracker::{ExecutionTracker, TimingRecord, TimingSummary};

/// All mutable state owned by one interactive session.
///
/// Passed by ownership into the orchestrator instead of living as ambient
/// global state; its lifecycle is exactly one user session.
#[derive(Debug, Default)]
pub struct Session {
    pub tracker: ExecutionTracker,
    pub cache: CacheStateMachine,
    pub dashboard: DashboardLog,
}

impl Session {
    /// Create a fresh session: empty history, cache assumed warm.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
