//! Append-only log of embedded-dashboard load-time samples.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which dashboard lifecycle event the sample measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStage {
    /// Dashboard finished initializing.
    Initialization,
    /// Dashboard finished rendering all widgets.
    RenderComplete,
}

impl std::fmt::Display for LoadStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialization => write!(f, "initialization"),
            Self::RenderComplete => write!(f, "render-complete"),
        }
    }
}

/// One load-time measurement reported by the embedded dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSample {
    pub stage: LoadStage,
    pub load_ms: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Ordered log of [`LoadSample`]s for one session.
#[derive(Debug, Default)]
pub struct DashboardLog {
    samples: Vec<LoadSample>,
}

impl DashboardLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample and return a copy of it.
    pub fn record(&mut self, stage: LoadStage, load_ms: f64) -> LoadSample {
        let sample = LoadSample {
            stage,
            load_ms,
            recorded_at: Utc::now(),
        };
        self.samples.push(sample.clone());
        sample
    }

    /// Read-only view of all samples, insertion order preserved.
    #[must_use]
    pub fn samples(&self) -> &[LoadSample] {
        &self.samples
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
