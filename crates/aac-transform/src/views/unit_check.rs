//! Cross-check between the litres and proof-litres bases of a series.

use std::collections::BTreeMap;

use aac_model::DataModel;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AnalysisView, ViewKind};
use crate::error::Result;
use crate::ratio::{RatioSummary, ratio};
use crate::share::add_present;
use crate::types::SeriesSelector;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitCheckParams {
    pub litres: SeriesSelector,
    pub proof: SeriesSelector,
}

impl UnitCheckParams {
    pub fn new(litres: SeriesSelector, proof: SeriesSelector) -> Self {
        Self { litres, proof }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitCheckPoint {
    pub date: NaiveDate,
    pub litres: Option<f64>,
    pub proof: Option<f64>,
    /// `litres / proof`; absent when either side is absent or proof is zero.
    pub ratio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitCheckFrame {
    pub litres: SeriesSelector,
    pub proof: SeriesSelector,
    /// Union of both selections' dates, ascending.
    pub points: Vec<UnitCheckPoint>,
    pub summary: RatioSummary,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnitCheckView;

impl AnalysisView for UnitCheckView {
    type Params = UnitCheckParams;
    type State = UnitCheckFrame;

    const KIND: ViewKind = ViewKind::UnitCheck;

    fn activate(&self, model: &DataModel, params: &UnitCheckParams) -> Result<UnitCheckFrame> {
        let litres = params.litres.selected(model)?;
        let proof = params.proof.selected(model)?;

        let mut aligned: BTreeMap<NaiveDate, (Option<f64>, Option<f64>)> = BTreeMap::new();
        for record in litres {
            let slot = aligned.entry(record.date).or_default();
            slot.0 = add_present(slot.0, record.value);
        }
        for record in proof {
            let slot = aligned.entry(record.date).or_default();
            slot.1 = add_present(slot.1, record.value);
        }

        let points: Vec<UnitCheckPoint> = aligned
            .into_iter()
            .map(|(date, (litres, proof))| UnitCheckPoint {
                date,
                litres,
                proof,
                ratio: ratio(litres, proof),
            })
            .collect();
        let summary = RatioSummary::from_ratios(points.iter().map(|point| point.ratio));
        if summary.count == 0 {
            tracing::warn!(
                litres = %params.litres.series_key,
                proof = %params.proof.series_key,
                "no date has both bases reported"
            );
        }

        Ok(UnitCheckFrame {
            litres: params.litres.clone(),
            proof: params.proof.clone(),
            points,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aac_model::RawRow;
    use aac_normalization::build_model;

    fn row(period: &str, series: &str, value: &str, units: &str) -> RawRow {
        RawRow::new()
            .with("Period", period)
            .with("Group", "Spirits")
            .with("Series_title_1", series)
            .with("Data_value", value)
            .with("UNITS", units)
    }

    fn model() -> DataModel {
        build_model(&[
            row("2016.03", "Spirits", "200", "Litres"),
            row("2016.03", "Spirits", "80", "ProofL"),
            row("2016.06", "Spirits", "150", "Litres"),
            row("2016.06", "Spirits", "0", "ProofL"),
            row("2016.09", "Spirits", "..", "Litres"),
            row("2016.09", "Spirits", "60", "ProofL"),
            row("2016.12", "Spirits", "90", "Litres"),
            row("2016.12", "Spirits", "30", "ProofL"),
        ])
    }

    #[test]
    fn test_ratios_and_summary() {
        let params = UnitCheckParams::new(
            SeriesSelector::new("spirits").with_units("Litres"),
            SeriesSelector::new("spirits").with_units("proofl"),
        );
        let frame = UnitCheckView.activate(&model(), &params).unwrap();
        let ratios: Vec<Option<f64>> = frame.points.iter().map(|p| p.ratio).collect();
        assert_eq!(ratios, vec![Some(2.5), None, None, Some(3.0)]);
        assert_eq!(frame.summary.count, 2);
        assert_eq!(frame.summary.mean, Some(2.75));
        assert_eq!(frame.summary.min, Some(2.5));
        assert_eq!(frame.summary.max, Some(3.0));
    }

    #[test]
    fn test_unknown_group_in_selector() {
        let params = UnitCheckParams::new(
            SeriesSelector::new("spirits").with_group("beer"),
            SeriesSelector::new("spirits"),
        );
        let err = UnitCheckView.activate(&model(), &params).unwrap_err();
        assert!(matches!(err, crate::TransformError::UnknownGroup { .. }));
    }

    #[test]
    fn test_selector_without_units_is_rejected() {
        let params = UnitCheckParams::new(
            SeriesSelector::new("spirits"),
            SeriesSelector::new("spirits").with_units("ProofL"),
        );
        let err = UnitCheckView.activate(&model(), &params).unwrap_err();
        assert_eq!(
            err,
            crate::TransformError::MixedUnits {
                series: "spirits".to_string(),
                first: "Litres".to_string(),
                second: "ProofL".to_string(),
            }
        );
    }
}
