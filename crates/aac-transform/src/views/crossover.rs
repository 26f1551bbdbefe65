//! Per-capita crossover view.

use aac_model::{AnalysisOptions, DataModel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AnalysisView, ViewKind};
use crate::crossover::{Crossover, NamedSeries, detect_crossovers, sort_crossovers};
use crate::error::Result;
use crate::pivot::Pivot;
use crate::types::{ActiveSet, date_from_day_number};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossoverParams {
    pub group_key: String,
    pub active: ActiveSet,
    pub window: usize,
    pub units: Option<String>,
}

impl CrossoverParams {
    pub fn new(group_key: impl Into<String>) -> Self {
        Self::from_options(group_key, &AnalysisOptions::default())
    }

    pub fn from_options(group_key: impl Into<String>, options: &AnalysisOptions) -> Self {
        Self {
            group_key: group_key.into(),
            active: ActiveSet::All,
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

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }
}

/// The (optionally smoothed) pivot of a group and every crossover in it.
///
/// Crossover times are day numbers on the pivot's axis; see
/// [`CrossoverFrame::crossover_date`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossoverFrame {
    pub pivot: Pivot,
    pub window: usize,
    /// Sorted by time, then by pair.
    pub crossovers: Vec<Crossover>,
}

impl CrossoverFrame {
    /// Calendar day a crossover falls on.
    pub fn crossover_date(crossover: &Crossover) -> Option<NaiveDate> {
        date_from_day_number(crossover.time)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CrossoverView;

impl AnalysisView for CrossoverView {
    type Params = CrossoverParams;
    type State = CrossoverFrame;

    const KIND: ViewKind = ViewKind::Crossover;

    fn activate(&self, model: &DataModel, params: &CrossoverParams) -> Result<CrossoverFrame> {
        let pivot = Pivot::build(
            model,
            &params.group_key,
            &params.active,
            params.units.as_deref(),
        )?
        .smoothed(params.window);

        let times = pivot.times();
        let columns = pivot.columns();
        let named: Vec<NamedSeries<'_>> = pivot
            .series
            .iter()
            .zip(&columns)
            .map(|(meta, values)| NamedSeries::new(&meta.key, values))
            .collect();
        let mut crossovers = detect_crossovers(&times, &named)?;
        sort_crossovers(&mut crossovers);

        tracing::debug!(
            group = %params.group_key,
            crossovers = crossovers.len(),
            "detected crossovers"
        );
        Ok(CrossoverFrame {
            pivot,
            window: params.window,
            crossovers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossover::CrossoverKind;
    use aac_model::RawRow;
    use aac_normalization::build_model;

    fn model() -> DataModel {
        let row = |period: &str, series: &str, value: &str| {
            RawRow::new()
                .with("Period", period)
                .with("Group", "Litres per head")
                .with("Series_title_1", series)
                .with("Data_value", value)
                .with("UNITS", "Litres")
        };
        build_model(&[
            row("2016.03", "Beer Per Head", "1"),
            row("2016.03", "Wine Per Head", "3"),
            row("2016.06", "Beer Per Head", "2"),
            row("2016.06", "Wine Per Head", "2"),
            row("2016.09", "Beer Per Head", "3"),
            row("2016.09", "Wine Per Head", "1"),
        ])
    }

    #[test]
    fn test_equality_crossover_on_dates() {
        let params = CrossoverParams::new("litres-per-head").with_window(1);
        let frame = CrossoverView.activate(&model(), &params).unwrap();
        assert_eq!(frame.crossovers.len(), 1);
        let crossover = &frame.crossovers[0];
        assert_eq!(crossover.kind, CrossoverKind::Exact);
        assert_eq!(crossover.value, 2.0);
        assert_eq!(crossover.first, "beer-per-head");
        assert_eq!(
            CrossoverFrame::crossover_date(crossover),
            NaiveDate::from_ymd_opt(2016, 6, 1)
        );
    }

    #[test]
    fn test_subset_of_one_has_no_crossovers() {
        let params = CrossoverParams::new("litres-per-head")
            .with_window(1)
            .with_active(ActiveSet::only(["beer-per-head"]));
        let frame = CrossoverView.activate(&model(), &params).unwrap();
        assert!(frame.crossovers.is_empty());
        assert_eq!(frame.pivot.series.len(), 1);
    }
}
