//! Projection of view frames into flat export tables.
//!
//! Every projection is long-format: one row per (time point or bucket,
//! series) pair, so the same CSV layout works for any number of active
//! series.

use aac_model::Measure;
use aac_transform::{
    CompositionFrame, CrossoverFrame, CrossoverKind, SeasonalHeatmap, TrendFrame, UnitCheckFrame,
    ViewState,
};

use crate::rounding::FieldKind;
use crate::row::{ExportColumn, ExportTable, ExportValue};

/// A derived structure that can be flattened for download.
pub trait ExportProjection {
    /// Flatten into rounded rows.
    fn project(&self) -> ExportTable;
}

fn columns(layout: &[(&str, FieldKind)]) -> Vec<ExportColumn> {
    layout
        .iter()
        .map(|&(name, kind)| ExportColumn::new(name, kind))
        .collect()
}

/// Columns of a projected [`TrendFrame`] for the given measure.
pub fn trend_columns(measure: Measure) -> Vec<ExportColumn> {
    let value_kind = match measure {
        Measure::Volume => FieldKind::Volume,
        Measure::Share => FieldKind::Share,
    };
    columns(&[
        ("date", FieldKind::Text),
        ("series", FieldKind::Text),
        ("units", FieldKind::Text),
        ("value", value_kind),
        ("total", FieldKind::Volume),
    ])
}

impl ExportProjection for TrendFrame {
    fn project(&self) -> ExportTable {
        let mut table = ExportTable::new(
            format!("trend-{}-{}", self.group.key, self.measure),
            trend_columns(self.measure),
        );
        for (idx, date) in self.dates.iter().enumerate() {
            for line in &self.lines {
                table.push(vec![
                    date.to_string().into(),
                    line.series.label.as_str().into(),
                    line.series.units.as_str().into(),
                    line.values.get(idx).copied().flatten().into(),
                    self.totals.get(idx).copied().into(),
                ]);
            }
        }
        table
    }
}

pub fn crossover_columns() -> Vec<ExportColumn> {
    columns(&[
        ("date", FieldKind::Text),
        ("time", FieldKind::Ratio),
        ("first", FieldKind::Text),
        ("second", FieldKind::Text),
        ("value", FieldKind::Volume),
        ("kind", FieldKind::Text),
    ])
}

impl ExportProjection for CrossoverFrame {
    fn project(&self) -> ExportTable {
        let mut table = ExportTable::new(
            format!("crossover-{}", self.pivot.group.key),
            crossover_columns(),
        );
        let label = |key: &str| {
            self.pivot
                .series
                .iter()
                .find(|meta| meta.key == key)
                .map_or_else(|| key.to_string(), |meta| meta.label.clone())
        };
        for crossover in &self.crossovers {
            let date = CrossoverFrame::crossover_date(crossover)
                .map_or(ExportValue::Missing, |d| d.to_string().into());
            let kind = match crossover.kind {
                CrossoverKind::Exact => "exact",
                CrossoverKind::Interpolated => "interpolated",
            };
            table.push(vec![
                date,
                crossover.time.into(),
                label(&crossover.first).into(),
                label(&crossover.second).into(),
                crossover.value.into(),
                kind.into(),
            ]);
        }
        table
    }
}

pub fn composition_columns() -> Vec<ExportColumn> {
    columns(&[
        ("bucket", FieldKind::Text),
        ("series", FieldKind::Text),
        ("value", FieldKind::Volume),
        ("share", FieldKind::Share),
        ("total", FieldKind::Volume),
    ])
}

impl ExportProjection for CompositionFrame {
    fn project(&self) -> ExportTable {
        let mut table = ExportTable::new(
            format!("composition-{}-{}", self.group.key, self.bucket_mode),
            composition_columns(),
        );
        for bucket in &self.buckets {
            for (idx, series) in self.series.iter().enumerate() {
                table.push(vec![
                    bucket.label.as_str().into(),
                    series.label.as_str().into(),
                    bucket.sums.get(idx).copied().flatten().into(),
                    bucket.shares.get(idx).copied().flatten().into(),
                    bucket.total.into(),
                ]);
            }
        }
        table
    }
}

pub fn seasonal_columns() -> Vec<ExportColumn> {
    columns(&[
        ("year", FieldKind::Year),
        ("month", FieldKind::Count),
        ("value", FieldKind::Volume),
        ("share", FieldKind::Share),
    ])
}

impl ExportProjection for SeasonalHeatmap {
    fn project(&self) -> ExportTable {
        let mut table = ExportTable::new(
            format!("seasonal-{}", self.series.key),
            seasonal_columns(),
        );
        for row in &self.rows {
            for cell in &row.cells {
                table.push(vec![
                    row.year.into(),
                    cell.month.into(),
                    cell.value.into(),
                    cell.share.into(),
                ]);
            }
        }
        table
    }
}

pub fn unit_check_columns() -> Vec<ExportColumn> {
    columns(&[
        ("date", FieldKind::Text),
        ("litres", FieldKind::Volume),
        ("proof", FieldKind::Volume),
        ("ratio", FieldKind::Ratio),
    ])
}

impl ExportProjection for UnitCheckFrame {
    fn project(&self) -> ExportTable {
        let mut table = ExportTable::new(
            format!("unit-check-{}", self.litres.series_key),
            unit_check_columns(),
        );
        for point in &self.points {
            table.push(vec![
                point.date.to_string().into(),
                point.litres.into(),
                point.proof.into(),
                point.ratio.into(),
            ]);
        }
        table
    }
}

impl ExportProjection for ViewState {
    fn project(&self) -> ExportTable {
        match self {
            ViewState::Trend(frame) => frame.project(),
            ViewState::Crossover(frame) => frame.project(),
            ViewState::Composition(frame) => frame.project(),
            ViewState::Seasonal(heatmap) => heatmap.project(),
            ViewState::UnitCheck(frame) => frame.project(),
        }
    }
}
