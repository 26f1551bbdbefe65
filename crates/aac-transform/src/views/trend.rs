//! Long-run trend lines per series.

use aac_model::{AnalysisOptions, DataModel, GroupMeta, Measure, SeriesMeta};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AnalysisView, ViewKind};
use crate::error::Result;
use crate::pivot::Pivot;
use crate::smoothing::moving_average;
use crate::types::ActiveSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendParams {
    pub group_key: String,
    pub active: ActiveSet,
    pub measure: Measure,
    /// `0` or `1` plots the values unsmoothed.
    pub window: usize,
    /// Restricts the pivot to one units label.
    pub units: Option<String>,
}

impl TrendParams {
    pub fn new(group_key: impl Into<String>) -> Self {
        Self::from_options(group_key, &AnalysisOptions::default())
    }

    pub fn from_options(group_key: impl Into<String>, options: &AnalysisOptions) -> Self {
        Self {
            group_key: group_key.into(),
            active: ActiveSet::All,
            measure: options.measure,
            window: options.smoothing_window,
            units: None,
        }
    }

    pub fn with_active(mut self, active: ActiveSet) -> Self {
        self.active = active;
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn with_measure(mut self, measure: Measure) -> Self {
        self.measure = measure;
        self
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub series: SeriesMeta,
    /// Aligned with [`TrendFrame::dates`].
    pub values: Vec<Option<f64>>,
}

/// Trend lines of the active series of one group.
///
/// `totals` are the unsmoothed sums of the active series per date. The
/// plotted measure is computed first and smoothed afterwards, so a smoothed
/// share line is the moving average of the raw shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendFrame {
    pub group: GroupMeta,
    pub measure: Measure,
    pub window: usize,
    pub dates: Vec<NaiveDate>,
    pub totals: Vec<f64>,
    pub lines: Vec<TrendLine>,
}

impl TrendFrame {
    /// Largest plotted value across the active lines.
    pub fn max_value(&self) -> Option<f64> {
        self.lines
            .iter()
            .flat_map(|line| line.values.iter().flatten().copied())
            .reduce(f64::max)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrendView;

impl AnalysisView for TrendView {
    type Params = TrendParams;
    type State = TrendFrame;

    const KIND: ViewKind = ViewKind::Trend;

    fn activate(&self, model: &DataModel, params: &TrendParams) -> Result<TrendFrame> {
        let pivot = Pivot::build(
            model,
            &params.group_key,
            &params.active,
            params.units.as_deref(),
        )?;

        let mut columns = pivot.columns();
        if params.measure == Measure::Share {
            let per_point: Vec<Vec<Option<f64>>> =
                pivot.points.iter().map(|point| point.shares()).collect();
            for (idx, column) in columns.iter_mut().enumerate() {
                *column = per_point.iter().map(|shares| shares[idx]).collect();
            }
        }

        let lines = pivot
            .series
            .iter()
            .cloned()
            .zip(columns)
            .map(|(series, values)| TrendLine {
                series,
                values: moving_average(&values, params.window),
            })
            .collect();

        Ok(TrendFrame {
            dates: pivot.dates(),
            totals: pivot.points.iter().map(|point| point.total).collect(),
            group: pivot.group,
            measure: params.measure,
            window: params.window,
            lines,
        })
    }
}
