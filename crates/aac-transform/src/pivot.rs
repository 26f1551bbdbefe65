//! Multi-series pivot onto a common time axis.

use std::collections::BTreeMap;

use aac_model::{DataModel, GroupMeta, NormalizedRecord, SeriesMeta};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TransformError};
use crate::share::{add_present, present_sum, shares};
use crate::smoothing::moving_average;
use crate::types::{ActiveSet, day_number, same_units};

/// One time point of a pivot: a value per series plus their total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotPoint {
    pub date: NaiveDate,
    /// Aligned with [`Pivot::series`].
    pub values: Vec<Option<f64>>,
    /// Sum of the present values, `0.0` when none is present.
    pub total: f64,
}

impl PivotPoint {
    fn new(date: NaiveDate, values: Vec<Option<f64>>) -> Self {
        let total = present_sum(values.iter().copied());
        Self {
            date,
            values,
            total,
        }
    }

    /// Per-series share of this point's total.
    pub fn shares(&self) -> Vec<Option<f64>> {
        shares(&self.values, self.total)
    }
}

/// The active series of one group laid out on the union of their dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pivot {
    pub group: GroupMeta,
    pub series: Vec<SeriesMeta>,
    pub points: Vec<PivotPoint>,
}

impl Pivot {
    /// Pivot the active series of `group_key`.
    ///
    /// Only records of that group take part, so a series key shared with
    /// another group does not leak into the totals. With `units` set, only
    /// records with that units label take part. Several records for the same
    /// series and date are summed, and each column's [`SeriesMeta::units`] is
    /// the label its records carry.
    ///
    /// # Errors
    ///
    /// [`TransformError::MixedUnits`] when a series still carries more than
    /// one units label, since those values are not additive.
    pub fn build(
        model: &DataModel,
        group_key: &str,
        active: &ActiveSet,
        units: Option<&str>,
    ) -> Result<Self> {
        let keys = active.resolve(model, group_key)?;
        let group = model
            .group(group_key)
            .cloned()
            .ok_or_else(|| TransformError::UnknownGroup {
                key: group_key.to_string(),
            })?;
        let mut series = keys
            .iter()
            .map(|key| {
                model
                    .series_meta(key)
                    .cloned()
                    .ok_or_else(|| TransformError::UnknownSeries { key: key.clone() })
            })
            .collect::<Result<Vec<_>>>()?;

        let records = model
            .group_records(group_key)
            .filter(|record| units.is_none_or(|units| same_units(&record.units, units)));
        let (points, observed) = pivot_records(records, &keys)?;
        for (meta, units) in series.iter_mut().zip(observed) {
            if let Some(units) = units {
                meta.units = units;
            }
        }
        tracing::debug!(
            group = group_key,
            series = series.len(),
            points = points.len(),
            "pivoted group"
        );
        Ok(Self {
            group,
            series,
            points,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|point| point.date).collect()
    }

    /// Numeric time axis, see [`day_number`].
    pub fn times(&self) -> Vec<f64> {
        self.points.iter().map(|point| day_number(point.date)).collect()
    }

    /// Values of one series across all points.
    pub fn column(&self, index: usize) -> Vec<Option<f64>> {
        self.points
            .iter()
            .map(|point| point.values.get(index).copied().flatten())
            .collect()
    }

    pub fn columns(&self) -> Vec<Vec<Option<f64>>> {
        (0..self.series.len()).map(|idx| self.column(idx)).collect()
    }

    /// A copy with every column smoothed and the totals recomputed.
    pub fn smoothed(&self, window: usize) -> Self {
        if window <= 1 {
            return self.clone();
        }
        let columns: Vec<Vec<Option<f64>>> = self
            .columns()
            .iter()
            .map(|column| moving_average(column, window))
            .collect();
        let points = self
            .points
            .iter()
            .enumerate()
            .map(|(row, point)| {
                let values = columns.iter().map(|column| column[row]).collect();
                PivotPoint::new(point.date, values)
            })
            .collect();
        Self {
            group: self.group.clone(),
            series: self.series.clone(),
            points,
        }
    }
}

/// Points on the union date axis, plus the units label seen in each slot.
fn pivot_records<'a, I>(
    records: I,
    keys: &[String],
) -> Result<(Vec<PivotPoint>, Vec<Option<String>>)>
where
    I: Iterator<Item = &'a NormalizedRecord>,
{
    let slot_of: BTreeMap<&str, usize> = keys
        .iter()
        .enumerate()
        .map(|(idx, key)| (key.as_str(), idx))
        .collect();
    let mut units: Vec<Option<&str>> = vec![None; keys.len()];
    let mut rows: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();
    for record in records {
        let Some(&slot) = slot_of.get(record.series_key.as_str()) else {
            continue;
        };
        match units[slot] {
            None => units[slot] = Some(record.units.trim()),
            Some(seen) if same_units(seen, &record.units) => {}
            Some(seen) => {
                return Err(TransformError::MixedUnits {
                    series: record.series_key.clone(),
                    first: seen.to_string(),
                    second: record.units.trim().to_string(),
                });
            }
        }
        let row = rows
            .entry(record.date)
            .or_insert_with(|| vec![None; keys.len()]);
        row[slot] = add_present(row[slot], record.value);
    }
    let points = rows
        .into_iter()
        .map(|(date, values)| PivotPoint::new(date, values))
        .collect();
    let units = units
        .into_iter()
        .map(|units| units.map(str::to_string))
        .collect();
    Ok((points, units))
}
