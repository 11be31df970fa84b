//! Append-only log of query execution timings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache_state::QueryType;

/// One completed (or partially completed) query cycle's measurements.
///
/// `get_ms` and `total_ms` are `None` exactly when the submission succeeded
/// but retrieval failed: partial failure still yields partial measurement
/// data. Records are never mutated or removed once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingRecord {
    pub query_type: QueryType,
    /// Wall-clock duration of the submission POST, in milliseconds.
    pub post_ms: f64,
    /// Wall-clock duration of the retrieval GET, absent on retrieval failure.
    pub get_ms: Option<f64>,
    /// Sum of both durations when the cycle fully completed.
    pub total_ms: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

impl TimingRecord {
    fn new(query_type: QueryType, post_ms: f64, get_ms: Option<f64>) -> Self {
        Self {
            query_type,
            post_ms,
            get_ms,
            total_ms: get_ms.map(|get| post_ms + get),
            recorded_at: Utc::now(),
        }
    }
}

/// Per-type aggregate over the recorded history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingSummary {
    pub query_type: QueryType,
    pub count: usize,
    pub mean_post_ms: f64,
    /// Mean over records that have a retrieval duration.
    pub mean_get_ms: Option<f64>,
    /// Mean over records that fully completed.
    pub mean_total_ms: Option<f64>,
}

/// Ordered, growable log of [`TimingRecord`]s for one session.
///
/// Appending never blocks and never fails; reads are pure.
#[derive(Debug, Default)]
pub struct ExecutionTracker {
    records: Vec<TimingRecord>,
}

impl ExecutionTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append exactly one record and return a copy of it.
    pub fn record(
        &mut self,
        query_type: QueryType,
        post_ms: f64,
        get_ms: Option<f64>,
    ) -> TimingRecord {
        let record = TimingRecord::new(query_type, post_ms, get_ms);
        self.records.push(record.clone());
        record
    }

    /// Read-only view of the full history, insertion order preserved.
    #[must_use]
    pub fn history(&self) -> &[TimingRecord] {
        &self.records
    }

    /// Records tagged with the given query type, insertion order preserved.
    #[must_use]
    pub fn filter_by_type(&self, query_type: QueryType) -> Vec<&TimingRecord> {
        self.records
            .iter()
            .filter(|r| r.query_type == query_type)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Aggregate the history for one query type, `None` if no records match.
    #[must_use]
    pub fn summary(&self, query_type: QueryType) -> Option<TimingSummary> {
        let matching = self.filter_by_type(query_type);
        if matching.is_empty() {
            return None;
        }

        let count = matching.len();
        let mean_post_ms =
            matching.iter().map(|r| r.post_ms).sum::<f64>() / count as f64;

        let gets: Vec<f64> = matching.iter().filter_map(|r| r.get_ms).collect();
        let totals: Vec<f64> = matching.iter().filter_map(|r| r.total_ms).collect();

        Some(TimingSummary {
            query_type,
            count,
            mean_post_ms,
            mean_get_ms: mean(&gets),
            mean_total_ms: mean(&totals),
        })
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
