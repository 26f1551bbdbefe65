//! Year by quarter-month heatmap for a single series.

use std::collections::BTreeMap;

use aac_model::{DataModel, QUARTER_END_MONTHS, SeriesMeta};
use serde::{Deserialize, Serialize};

use super::{AnalysisView, ViewKind};
use crate::error::{Result, TransformError};
use crate::share::{add_present, present_sum, share_of};
use crate::types::SeriesSelector;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalParams {
    pub selector: SeriesSelector,
}

impl SeasonalParams {
    pub fn new(selector: SeriesSelector) -> Self {
        Self { selector }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatCell {
    pub month: u32,
    pub value: Option<f64>,
    /// Share of the year's total under the usual share policy.
    pub share: Option<f64>,
}

/// One heatmap row: a year with a cell per quarter-ending month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatRow {
    pub year: i32,
    pub total: f64,
    pub cells: Vec<HeatCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalHeatmap {
    pub series: SeriesMeta,
    /// Column order of every row's cells.
    pub months: Vec<u32>,
    /// Ascending by year.
    pub rows: Vec<HeatRow>,
    /// Smallest and largest present value, for colour scaling.
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SeasonalView;

impl AnalysisView for SeasonalView {
    type Params = SeasonalParams;
    type State = SeasonalHeatmap;

    const KIND: ViewKind = ViewKind::Seasonal;

    fn activate(&self, model: &DataModel, params: &SeasonalParams) -> Result<SeasonalHeatmap> {
        let selector = &params.selector;
        let records = selector.selected(model)?;
        let series = model
            .series_meta(&selector.series_key)
            .cloned()
            .ok_or_else(|| TransformError::UnknownSeries {
                key: selector.series_key.clone(),
            })?;

        let months = QUARTER_END_MONTHS.to_vec();
        let mut grid: BTreeMap<i32, Vec<Option<f64>>> = BTreeMap::new();
        for record in records {
            let Some(col) = months.iter().position(|&m| m == record.month) else {
                continue;
            };
            let row = grid
                .entry(record.year)
                .or_insert_with(|| vec![None; months.len()]);
            row[col] = add_present(row[col], record.value);
        }

        let mut min: Option<f64> = None;
        let mut max: Option<f64> = None;
        let rows = grid
            .into_iter()
            .map(|(year, values)| {
                let total = present_sum(values.iter().copied());
                let cells = months
                    .iter()
                    .zip(values)
                    .map(|(&month, value)| {
                        if let Some(v) = value {
                            min = Some(min.map_or(v, |m| m.min(v)));
                            max = Some(max.map_or(v, |m| m.max(v)));
                        }
                        HeatCell {
                            month,
                            value,
                            share: share_of(value, total),
                        }
                    })
                    .collect();
                HeatRow { year, total, cells }
            })
            .collect();

        Ok(SeasonalHeatmap {
            series,
            months,
            rows,
            min,
            max,
        })
    }
}
