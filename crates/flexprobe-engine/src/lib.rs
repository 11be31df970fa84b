//! Query orchestration for flexprobe.
//!
//! The [`Orchestrator`] sequences the probe's pipelines against the API
//! transport: cache reload, or query submission + result retrieval. It feeds
//! wall-clock timings into the session's execution tracker, raw result
//! payloads into the decoder, and reload/completion events into the
//! cache-state machine. The [`dashboard`] module carries the embedded
//! dashboard load-time probe.

pub mod dashboard;
mod orchestrator;

pub use orchestrator::{Orchestrator, QueryOutcome};
