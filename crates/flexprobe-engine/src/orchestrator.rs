//! Sequencing of the reload and query pipelines.

use std::time::Instant;

use flexprobe_api::{AnalyticsApi, ApiError};
use flexprobe_decode::{AnalyticalResponse, DecodeError, DecodedRow, Decoder};
use flexprobe_session::{LoadSample, Session, TimingRecord};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::dashboard::{self, DashboardEventError};

/// Everything one completed query cycle produced.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    /// The measurement appended to the session history for this cycle.
    pub timing: TimingRecord,
    /// Decoded result rows; empty when decoding failed.
    pub rows: Vec<DecodedRow>,
    /// Retained decode error when the retrieved payload had a bad shape.
    ///
    /// A successful retrieval with an unparsable body does not discard the
    /// timing measurement already obtained; the rows degrade to empty and the
    /// error is kept here instead of aborting the pipeline.
    pub decode_failure: Option<DecodeError>,
}

/// Sequences reload and query pipelines and owns the session state.
///
/// Single-threaded, one pipeline per user action, no retries and no
/// cancellation: each call either completes or surfaces the transport's own
/// failure. The session (timing history, cache state, dashboard samples) is
/// owned here and scoped to this instance's lifetime.
pub struct Orchestrator {
    api: Box<dyn AnalyticsApi>,
    decoder: Decoder,
    request_body: Value,
    session: Session,
}

impl Orchestrator {
    /// Create an orchestrator over the given transport and AFM request body.
    ///
    /// The body is held verbatim and handed to the submission endpoint
    /// unmodified on every query.
    #[must_use]
    pub fn new(api: Box<dyn AnalyticsApi>, request_body: Value) -> Self {
        Self {
            api,
            decoder: Decoder::default(),
            request_body,
            session: Session::new(),
        }
    }

    /// Replace the default decoder (four leading measure columns).
    #[must_use]
    pub fn with_decoder(mut self, decoder: Decoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Read access to the session state.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Invalidate the acceleration layer.
    ///
    /// On success (status < 205) the cache-state machine transitions to
    /// `Reloaded`, so the next completed query is classified uncached. On
    /// failure the state is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ReloadFailed`] with the raw status and body, or a
    /// transport error if the call never produced a response.
    pub async fn run_reload_cache(&mut self) -> Result<(), ApiError> {
        let response = self.api.reload_cache().await?;

        if response.status < 205 {
            self.session.cache.on_reload_succeeded();
            info!(status = response.status, "Cache reloaded");
            Ok(())
        } else {
            Err(ApiError::ReloadFailed {
                status: response.status,
                body: response.body,
            })
        }
    }

    /// Run one query cycle: submit the AFM execution, retrieve its result,
    /// decode, and record the measurements.
    ///
    /// The query's cached/uncached tag is captured from the state machine
    /// before anything executes; completing the cycle is what flips a
    /// `Reloaded` state back to `Warm`, so the order is load-bearing.
    ///
    /// # Errors
    ///
    /// - [`ApiError::SubmissionFailed`]: non-200 submission. Nothing is
    ///   recorded and nothing is decoded.
    /// - [`ApiError::MalformedResponse`]: submission succeeded but carried no
    ///   result identifier. Nothing is recorded.
    /// - [`ApiError::RetrievalFailed`]: non-200 retrieval. The submission
    ///   timing is still recorded (with the retrieval duration absent) and
    ///   the cache state is NOT transitioned: the reload has not been
    ///   consumed by a completed query.
    pub async fn run_query(&mut self) -> Result<QueryOutcome, ApiError> {
        let query_type = self.session.cache.current_query_type();

        let post_start = Instant::now();
        let submission = self.api.execute_afm(&self.request_body).await?;
        let post_ms = elapsed_ms(post_start);

        if submission.status != 200 {
            return Err(ApiError::SubmissionFailed {
                status: submission.status,
                body: submission.body,
            });
        }

        let result_id = extract_result_id(&submission.body)?;
        debug!(query_type = %query_type, post_ms, result_id = %result_id, "Submission accepted");

        let get_start = Instant::now();
        let retrieval = self.api.fetch_result(&result_id).await?;
        let get_ms = elapsed_ms(get_start);

        if retrieval.status != 200 {
            // Partial failure still yields partial measurement data.
            self.session.tracker.record(query_type, post_ms, None);
            return Err(ApiError::RetrievalFailed {
                status: retrieval.status,
                body: retrieval.body,
            });
        }

        let (rows, decode_failure) = match AnalyticalResponse::from_json(&retrieval.body)
            .and_then(|response| self.decoder.decode(&response))
        {
            Ok(rows) => (rows, None),
            Err(e) => {
                warn!(error = %e, "Result decoding failed, returning no rows");
                (Vec::new(), Some(e))
            }
        };

        self.session.cache.on_query_completed();
        let timing = self.session.tracker.record(query_type, post_ms, Some(get_ms));

        info!(
            query_type = %query_type,
            post_ms,
            get_ms,
            rows = rows.len(),
            "Query cycle completed"
        );

        Ok(QueryOutcome {
            timing,
            rows,
            decode_failure,
        })
    }

    /// Record a load-time event posted back by the embedded dashboard.
    ///
    /// # Errors
    ///
    /// Returns a [`DashboardEventError`] if the payload is not a valid
    /// dashboard load event.
    pub fn record_dashboard_event(
        &mut self,
        payload: &str,
    ) -> Result<LoadSample, DashboardEventError> {
        let (stage, load_ms) = dashboard::parse_load_event(payload)?;
        Ok(self.session.dashboard.record(stage, load_ms))
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Pull the result-location identifier out of a submission response.
fn extract_result_id(body: &str) -> Result<String, ApiError> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        ApiError::MalformedResponse(format!("submission response is not valid JSON: {e}"))
    })?;

    value
        .pointer("/executionResponse/links/executionResult")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| {
            ApiError::MalformedResponse(
                "submission response is missing executionResponse.links.executionResult"
                    .to_string(),
            )
        })
}
