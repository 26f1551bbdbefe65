//! The shared, read-only data model and its lookup indexes.
//!
//! [`DataModel::build`] takes the date-sorted record sequence produced by the
//! normalizer and derives every index once. Nothing mutates the model after
//! that; views borrow it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::record::NormalizedRecord;

/// Display metadata for a top-level category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMeta {
    pub key: String,
    pub label: String,
}

/// Display metadata for a named series.
///
/// `group_key` and `units` come from the first record seen for the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesMeta {
    pub key: String,
    pub label: String,
    pub group_key: String,
    pub units: String,
}

/// Normalized records plus grouping indexes and sorted domains.
#[derive(Debug, Clone, Default)]
pub struct DataModel {
    records: Vec<NormalizedRecord>,
    by_group: BTreeMap<String, Vec<usize>>,
    by_series: BTreeMap<String, Vec<usize>>,
    group_series: BTreeMap<String, Vec<String>>,
    groups: Vec<GroupMeta>,
    series: Vec<SeriesMeta>,
    years: Vec<i32>,
    months: Vec<u32>,
}

impl DataModel {
    /// Indexes an already date-sorted record sequence.
    ///
    /// Index buckets hold positions into `records`, so each bucket keeps the
    /// input (date) order. Labels are taken from the first record seen per key.
    pub fn build(records: Vec<NormalizedRecord>) -> Self {
        let mut by_group: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        let mut by_series: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        let mut group_meta: BTreeMap<String, GroupMeta> = BTreeMap::new();
        let mut series_meta: BTreeMap<String, SeriesMeta> = BTreeMap::new();
        let mut members: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut years = BTreeSet::new();
        let mut months = BTreeSet::new();

        for (idx, record) in records.iter().enumerate() {
            by_group
                .entry(record.group_key.clone())
                .or_default()
                .push(idx);
            by_series
                .entry(record.series_key.clone())
                .or_default()
                .push(idx);
            group_meta
                .entry(record.group_key.clone())
                .or_insert_with(|| GroupMeta {
                    key: record.group_key.clone(),
                    label: record.group_label.clone(),
                });
            series_meta
                .entry(record.series_key.clone())
                .or_insert_with(|| SeriesMeta {
                    key: record.series_key.clone(),
                    label: record.series_label.clone(),
                    group_key: record.group_key.clone(),
                    units: record.units.clone(),
                });
            members
                .entry(record.group_key.clone())
                .or_default()
                .insert(record.series_key.clone());
            years.insert(record.year);
            months.insert(record.month);
        }

        let mut groups: Vec<GroupMeta> = group_meta.into_values().collect();
        groups.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.key.cmp(&b.key)));

        let mut series: Vec<SeriesMeta> = series_meta.into_values().collect();
        series.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.key.cmp(&b.key)));

        let label_of: BTreeMap<&str, &str> = series
            .iter()
            .map(|meta| (meta.key.as_str(), meta.label.as_str()))
            .collect();
        let group_series = members
            .into_iter()
            .map(|(group, keys)| {
                let mut keys: Vec<String> = keys.into_iter().collect();
                keys.sort_by(|a, b| {
                    let left = label_of.get(a.as_str()).copied().unwrap_or_default();
                    let right = label_of.get(b.as_str()).copied().unwrap_or_default();
                    left.cmp(right).then_with(|| a.cmp(b))
                });
                (group, keys)
            })
            .collect();

        Self {
            records,
            by_group,
            by_series,
            group_series,
            groups,
            series,
            years: years.into_iter().collect(),
            months: months.into_iter().collect(),
        }
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Group key to record positions, in date order.
    pub fn by_group(&self) -> &BTreeMap<String, Vec<usize>> {
        &self.by_group
    }

    /// Series key to record positions, in date order.
    pub fn by_series(&self) -> &BTreeMap<String, Vec<usize>> {
        &self.by_series
    }

    pub fn group_records<'a>(
        &'a self,
        group_key: &str,
    ) -> impl Iterator<Item = &'a NormalizedRecord> + 'a {
        self.positions(self.by_group.get(group_key))
    }

    pub fn series_records<'a>(
        &'a self,
        series_key: &str,
    ) -> impl Iterator<Item = &'a NormalizedRecord> + 'a {
        self.positions(self.by_series.get(series_key))
    }

    fn positions<'a>(
        &'a self,
        positions: Option<&'a Vec<usize>>,
    ) -> impl Iterator<Item = &'a NormalizedRecord> + 'a {
        positions
            .into_iter()
            .flatten()
            .filter_map(|&idx| self.records.get(idx))
    }

    /// Groups sorted by display label.
    pub fn groups(&self) -> &[GroupMeta] {
        &self.groups
    }

    /// Series sorted by display label.
    pub fn series(&self) -> &[SeriesMeta] {
        &self.series
    }

    pub fn group(&self, key: &str) -> Option<&GroupMeta> {
        self.groups.iter().find(|meta| meta.key == key)
    }

    pub fn series_meta(&self, key: &str) -> Option<&SeriesMeta> {
        self.series.iter().find(|meta| meta.key == key)
    }

    /// Series keys that have at least one record in `group_key`, sorted by label.
    pub fn series_in_group(&self, group_key: &str) -> &[String] {
        self.group_series
            .get(group_key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn months(&self) -> &[u32] {
        &self.months
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::record_date;

    fn record(group: &str, series: &str, year: i32, month: u32) -> NormalizedRecord {
        NormalizedRecord {
            period: format!("{year}.{month:02}"),
            date: record_date(year, month).unwrap(),
            year,
            month,
            value: Some(1.0),
            units: "Litres".to_string(),
            group_key: group.to_lowercase(),
            group_label: group.to_string(),
            series_key: series.to_lowercase(),
            series_label: series.to_string(),
        }
    }

    #[test]
    fn empty_input_builds_empty_model() {
        let model = DataModel::build(Vec::new());
        assert!(model.is_empty());
        assert!(model.by_group().is_empty());
        assert!(model.by_series().is_empty());
        assert!(model.groups().is_empty());
        assert!(model.years().is_empty());
        assert!(model.months().is_empty());
        assert!(model.series_in_group("anything").is_empty());
    }

    #[test]
    fn first_seen_label_wins() {
        let mut second = record("Volume", "Beer", 2001, 3);
        second.series_label = "BEER".to_string();
        let model = DataModel::build(vec![record("Volume", "Beer", 2000, 3), second]);

        assert_eq!(model.series_meta("beer").unwrap().label, "Beer");
    }

    #[test]
    fn series_in_group_is_label_sorted() {
        let model = DataModel::build(vec![
            record("Volume", "Wine", 2000, 3),
            record("Volume", "Beer", 2000, 3),
            record("Volume", "Spirits", 2000, 3),
        ]);
        assert_eq!(model.series_in_group("volume"), ["beer", "spirits", "wine"]);
    }
}
