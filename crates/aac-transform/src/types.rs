//! Core selection types shared by the analytical views.

use std::collections::BTreeSet;

use aac_model::{DataModel, NormalizedRecord};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TransformError};

/// The series currently switched on in a view.
///
/// Every total, maximum and share a view derives is scoped to this set, so
/// toggling a series is a full recomputation with a different `ActiveSet`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveSet {
    /// Every series in the group.
    #[default]
    All,
    /// Only the listed series keys.
    Only(BTreeSet<String>),
}

impl ActiveSet {
    /// Restrict to the given series keys.
    pub fn only<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(keys.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, series_key: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(keys) => keys.contains(series_key),
        }
    }

    /// Resolve the active series of a group, in display-label order.
    ///
    /// # Errors
    ///
    /// [`TransformError::UnknownGroup`] for a group the model does not hold,
    /// [`TransformError::UnknownSeries`] for an active key outside the group.
    pub fn resolve(&self, model: &DataModel, group_key: &str) -> Result<Vec<String>> {
        if model.group(group_key).is_none() {
            return Err(TransformError::UnknownGroup {
                key: group_key.to_string(),
            });
        }
        let members = model.series_in_group(group_key);
        if let Self::Only(keys) = self
            && let Some(unknown) = keys.iter().find(|key| !members.contains(*key))
        {
            return Err(TransformError::UnknownSeries {
                key: unknown.clone(),
            });
        }
        Ok(members
            .iter()
            .filter(|key| self.contains(key))
            .cloned()
            .collect())
    }
}

/// Picks the records of one series, optionally narrowed to a group and a
/// units label.
///
/// A series key alone can span several groups (the same beverage measured in
/// litres of beverage and litres of alcohol), so views that work on a single
/// series accept the extra qualifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSelector {
    pub series_key: String,
    pub group_key: Option<String>,
    pub units: Option<String>,
}

impl SeriesSelector {
    pub fn new(series_key: impl Into<String>) -> Self {
        Self {
            series_key: series_key.into(),
            group_key: None,
            units: None,
        }
    }

    pub fn with_group(mut self, group_key: impl Into<String>) -> Self {
        self.group_key = Some(group_key.into());
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Check the selector against the model's domains.
    pub fn validate(&self, model: &DataModel) -> Result<()> {
        if let Some(group) = &self.group_key
            && model.group(group).is_none()
        {
            return Err(TransformError::UnknownGroup { key: group.clone() });
        }
        if model.series_meta(&self.series_key).is_none() {
            return Err(TransformError::UnknownSeries {
                key: self.series_key.clone(),
            });
        }
        Ok(())
    }

    /// Units are compared with [`same_units`].
    pub fn matches(&self, record: &NormalizedRecord) -> bool {
        record.series_key == self.series_key
            && self
                .group_key
                .as_deref()
                .is_none_or(|group| record.group_key == group)
            && self
                .units
                .as_deref()
                .is_none_or(|units| same_units(&record.units, units))
    }

    /// The selected records, checked to describe one measurement.
    ///
    /// # Errors
    ///
    /// Besides the [`validate`](Self::validate) errors,
    /// [`TransformError::AmbiguousSeries`] when no group is set and the
    /// records span groups, and [`TransformError::MixedUnits`] when no units
    /// label is set and the records carry more than one.
    pub fn selected<'a>(&'a self, model: &'a DataModel) -> Result<Vec<&'a NormalizedRecord>> {
        self.validate(model)?;
        let records: Vec<&NormalizedRecord> = self.records(model).collect();
        let Some(first) = records.first() else {
            return Ok(records);
        };
        if self.group_key.is_none()
            && let Some(other) = records.iter().find(|r| r.group_key != first.group_key)
        {
            return Err(TransformError::AmbiguousSeries {
                series: self.series_key.clone(),
                first: first.group_key.clone(),
                second: other.group_key.clone(),
            });
        }
        if self.units.is_none() {
            check_single_units(&self.series_key, records.iter().copied())?;
        }
        Ok(records)
    }

    /// The selected records, in date order.
    pub fn records<'a>(
        &'a self,
        model: &'a DataModel,
    ) -> impl Iterator<Item = &'a NormalizedRecord> + 'a {
        model
            .series_records(&self.series_key)
            .filter(move |record| self.matches(record))
    }
}

/// Units labels compare case-insensitively after trimming.
pub fn same_units(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Fails with [`TransformError::MixedUnits`] when the records of
/// `series_key` carry more than one units label.
fn check_single_units<'a, I>(series_key: &str, records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    let mut seen: Option<&str> = None;
    for record in records {
        match seen {
            None => seen = Some(record.units.trim()),
            Some(units) if same_units(units, &record.units) => {}
            Some(units) => {
                return Err(TransformError::MixedUnits {
                    series: series_key.to_string(),
                    first: units.to_string(),
                    second: record.units.trim().to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Numeric time coordinate of a date: days since 0001-01-01 (day 1).
pub fn day_number(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// The calendar day a (possibly fractional) day number falls on.
pub fn date_from_day_number(day: f64) -> Option<NaiveDate> {
    let day = day.floor();
    if !day.is_finite() || day < f64::from(i32::MIN) || day > f64::from(i32::MAX) {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(day as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_set_contains() {
        assert!(ActiveSet::All.contains("beer"));
        let only = ActiveSet::only(["beer"]);
        assert!(only.contains("beer"));
        assert!(!only.contains("wine"));
    }

    #[test]
    fn test_day_number_round_trip() {
        let date = NaiveDate::from_ymd_opt(2019, 3, 1).unwrap();
        let day = day_number(date);
        assert_eq!(date_from_day_number(day), Some(date));
        assert_eq!(date_from_day_number(day + 0.75), Some(date));
        assert_eq!(date_from_day_number(f64::NAN), None);
    }
}
