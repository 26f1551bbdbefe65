//! Tests for the data model indexes.

use aac_model::{DataModel, NormalizedRecord, record_date};

fn record(group: &str, series: &str, year: i32, month: u32, value: Option<f64>) -> NormalizedRecord {
    NormalizedRecord {
        period: format!("{year}.{month:02}"),
        date: record_date(year, month).unwrap(),
        year,
        month,
        value,
        units: "Litres".to_string(),
        group_key: group.to_lowercase().replace(' ', "-"),
        group_label: group.to_string(),
        series_key: series.to_lowercase().replace(' ', "-"),
        series_label: series.to_string(),
    }
}

fn sample() -> Vec<NormalizedRecord> {
    vec![
        record("Litres of Beverage", "Beer", 1999, 12, Some(10.0)),
        record("Per Head", "Beer Per Head", 1999, 12, Some(1.0)),
        record("Litres of Beverage", "Wine", 2000, 3, None),
        record("Litres of Beverage", "Beer", 2000, 3, Some(12.0)),
        record("Per Head", "Wine Per Head", 2000, 6, Some(0.5)),
        record("Litres of Beverage", "Beer", 2000, 6, Some(14.0)),
    ]
}

#[test]
fn every_record_lands_in_exactly_one_bucket() {
    let model = DataModel::build(sample());

    let group_total: usize = model.by_group().values().map(Vec::len).sum();
    let series_total: usize = model.by_series().values().map(Vec::len).sum();
    assert_eq!(group_total, model.len());
    assert_eq!(series_total, model.len());

    let mut seen = vec![0usize; model.len()];
    for positions in model.by_group().values() {
        for &idx in positions {
            seen[idx] += 1;
        }
    }
    assert!(seen.iter().all(|&count| count == 1));
}

#[test]
fn buckets_keep_date_order() {
    let model = DataModel::build(sample());
    let dates: Vec<_> = model.series_records("beer").map(|r| r.date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
    assert_eq!(dates.len(), 3);
}

#[test]
fn metadata_lists_are_label_sorted() {
    let model = DataModel::build(sample());

    let groups: Vec<&str> = model.groups().iter().map(|g| g.label.as_str()).collect();
    assert_eq!(groups, vec!["Litres of Beverage", "Per Head"]);

    let series: Vec<&str> = model.series().iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        series,
        vec!["Beer", "Beer Per Head", "Wine", "Wine Per Head"]
    );
}

#[test]
fn domains_are_unique_and_ascending() {
    let model = DataModel::build(sample());
    assert_eq!(model.years(), [1999, 2000]);
    assert_eq!(model.months(), [3, 6, 12]);
}

#[test]
fn lookups_by_key() {
    let model = DataModel::build(sample());
    assert_eq!(model.group("per-head").unwrap().label, "Per Head");
    assert_eq!(model.series_meta("wine").unwrap().group_key, "litres-of-beverage");
    assert!(model.group("missing").is_none());
    assert_eq!(model.group_records("litres-of-beverage").count(), 4);
    assert_eq!(model.series_records("missing").count(), 0);
}
