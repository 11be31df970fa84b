//! Cache-state machine classifying query executions.

use serde::{Deserialize, Serialize};

/// Classification of a query execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    /// Served from the in-memory acceleration layer.
    Cached,
    /// Ran against the underlying database, immediately following a reload.
    Uncached,
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cached => write!(f, "cached"),
            Self::Uncached => write!(f, "uncached"),
        }
    }
}

/// Whether the acceleration layer is expected to serve the next query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheState {
    /// Cache holds the query's working set; executions are classified cached.
    #[default]
    Warm,
    /// Cache was invalidated; the next completed query hits the database.
    Reloaded,
}

impl std::fmt::Display for CacheState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warm => write!(f, "warm"),
            Self::Reloaded => write!(f, "reloaded"),
        }
    }
}

/// Tracks whether the next query execution is expected to be served cold.
///
/// The classification must be captured via [`current_query_type`] BEFORE
/// [`on_query_completed`] runs: completing a query in the `Reloaded` state
/// flips the machine back to `Warm`, so a tag computed afterwards is wrong.
///
/// `on_query_completed` fires only after a fully successful query cycle
/// (submission and retrieval both succeeded). A failed retrieval leaves the
/// machine in `Reloaded`: the invalidated cache has not been repopulated by a
/// completed query, so the next attempt is still classified uncached.
///
/// [`current_query_type`]: CacheStateMachine::current_query_type
/// [`on_query_completed`]: CacheStateMachine::on_query_completed
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStateMachine {
    state: CacheState,
}

impl CacheStateMachine {
    /// Create a machine in the `Warm` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> CacheState {
        self.state
    }

    /// Classification for the next query execution.
    #[must_use]
    pub fn current_query_type(&self) -> QueryType {
        match self.state {
            CacheState::Warm => QueryType::Cached,
            CacheState::Reloaded => QueryType::Uncached,
        }
    }

    /// A cache reload completed successfully; any state becomes `Reloaded`.
    pub fn on_reload_succeeded(&mut self) {
        self.state = CacheState::Reloaded;
    }

    /// A query cycle fully completed; `Reloaded` becomes `Warm`.
    ///
    /// In the `Warm` state this is a no-op.
    pub fn on_query_completed(&mut self) {
        self.state = CacheState::Warm;
    }
}
