//! Export projection, CSV encoding and re-reading.

use aac_model::{BucketMode, RawRow};
use aac_normalization::build_model;
use aac_output::{
    ExportProjection, FieldKind, format_number, parse_csv_table, read_csv_table, round_for,
    to_csv_string, write_csv,
};
use aac_transform::{
    AnalysisView, CompositionParams, CompositionView, SeriesSelector, UnitCheckParams,
    UnitCheckView,
};
use proptest::prelude::*;

fn row(group: &str, series: &str, period: &str, value: &str, units: &str) -> RawRow {
    RawRow::new()
        .with("Period", period)
        .with("Group", group)
        .with("Series_title_1", series)
        .with("Data_value", value)
        .with("UNITS", units)
}

#[test]
fn composition_csv_snapshot() {
    let model = build_model(&[
        row("Litres of Beverage", "Beer", "2014.03", "10", "Litres"),
        row("Litres of Beverage", "Wine", "2014.03", "..", "Litres"),
        row("Litres of Beverage", "Beer", "2021.03", "30", "Litres"),
        row("Litres of Beverage", "Wine", "2021.03", "10", "Litres"),
    ]);
    let params =
        CompositionParams::new("litres-of-beverage").with_bucket_mode(BucketMode::Decade);
    let frame = CompositionView.activate(&model, &params).unwrap();
    let csv = to_csv_string(&frame.project()).unwrap();
    insta::assert_snapshot!(csv, @r"
    bucket,series,value,share,total
    2010-2019,Beer,10,1,10
    2010-2019,Wine,,,10
    2020-2029,Beer,30,0.75,40
    2020-2029,Wine,10,0.25,40
    ");
}

#[test]
fn unit_check_round_trip_reproduces_rounded_values() {
    let model = build_model(&[
        row("Spirits", "Spirits", "2016.03", "200", "Litres"),
        row("Spirits", "Spirits", "2016.03", "70", "ProofL"),
        row("Spirits", "Spirits", "2016.06", "123.45678", "Litres"),
        row("Spirits", "Spirits", "2016.06", "..", "ProofL"),
    ]);
    let params = UnitCheckParams::new(
        SeriesSelector::new("spirits").with_units("Litres"),
        SeriesSelector::new("spirits").with_units("ProofL"),
    );
    let frame = UnitCheckView.activate(&model, &params).unwrap();
    let table = frame.project();

    let first = to_csv_string(&table).unwrap();
    let reread = parse_csv_table(&table.name, &first, table.columns()).unwrap();
    assert_eq!(reread, table);
    assert_eq!(to_csv_string(&reread).unwrap(), first);

    let ratio = table.rows()[0].get("ratio").and_then(|v| v.as_number());
    assert_eq!(ratio, Some(2.8571));
    let litres = table.rows()[1].get("litres").and_then(|v| v.as_number());
    assert_eq!(litres, Some(123.457));
}

#[test]
fn write_then_read_file() {
    let model = build_model(&[row("Litres of Beverage", "Beer", "2014.03", "10", "Litres")]);
    let frame = CompositionView
        .activate(&model, &CompositionParams::new("litres-of-beverage"))
        .unwrap();
    let table = frame.project();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exports").join(format!("{}.csv", table.name));
    write_csv(&table, &path).unwrap();
    let reread = read_csv_table(&path, table.columns()).unwrap();
    assert_eq!(reread, table);
}

fn kinds() -> impl Strategy<Value = FieldKind> {
    prop_oneof![
        Just(FieldKind::Volume),
        Just(FieldKind::Share),
        Just(FieldKind::Ratio),
        Just(FieldKind::Count),
        Just(FieldKind::Year),
    ]
}

proptest! {
    #[test]
    fn rounding_is_idempotent(value in -1.0e9..1.0e9_f64, kind in kinds()) {
        let once = round_for(value, kind);
        prop_assert_eq!(round_for(once, kind), once);
    }

    #[test]
    fn formatted_numbers_parse_back(value in -1.0e9..1.0e9_f64, kind in kinds()) {
        let rounded = round_for(value, kind);
        let parsed: f64 = format_number(rounded).parse().unwrap();
        prop_assert_eq!(parsed, rounded);
    }
}
