//! Configuration options for analytical views.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Trailing window used by trend smoothing when none is configured.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 4;

/// Temporal bucket used by composition aggregation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BucketMode {
    /// One bucket per calendar year.
    Year,
    /// One bucket per decade, labelled `"2010-2019"`.
    #[default]
    Decade,
}

impl fmt::Display for BucketMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketMode::Year => write!(f, "year"),
            BucketMode::Decade => write!(f, "decade"),
        }
    }
}

/// What a trend line plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    /// Raw reported values.
    #[default]
    Volume,
    /// Each series as a share of the active-series total at that point.
    Share,
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Volume => write!(f, "volume"),
            Measure::Share => write!(f, "share"),
        }
    }
}

/// Options shared by the analytical views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Trailing moving-average window. `0` or `1` disables smoothing.
    pub smoothing_window: usize,

    /// Bucketing used by composition views.
    pub bucket_mode: BucketMode,

    /// Measure plotted by trend views.
    pub measure: Measure,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            bucket_mode: BucketMode::default(),
            measure: Measure::default(),
        }
    }
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_smoothing_window(mut self, window: usize) -> Self {
        self.smoothing_window = window;
        self
    }

    #[must_use]
    pub fn with_bucket_mode(mut self, mode: BucketMode) -> Self {
        self.bucket_mode = mode;
        self
    }

    #[must_use]
    pub fn with_measure(mut self, measure: Measure) -> Self {
        self.measure = measure;
        self
    }

    /// Returns true when the configured window actually changes the data.
    pub fn smoothing_enabled(&self) -> bool {
        self.smoothing_window > 1
    }
}
