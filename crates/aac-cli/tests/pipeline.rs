//! Integration tests for the bootstrap and view pipeline.

use std::fs;
use std::io::Write;

use aac_cli::pipeline::{bootstrap, load_options, run_view};
use aac_cli::report::{model_overview, view_headline};
use aac_ingest::IngestError;
use aac_model::{BucketMode, Measure};
use aac_transform::{
    CompositionParams, CrossoverParams, SeriesSelector, UnitCheckParams, ViewRequest, ViewState,
};
use insta::assert_snapshot;
use tempfile::{NamedTempFile, TempDir};

const SOURCE: &str = "\
Series_reference,Period,Data_value,STATUS,UNITS,Group,Series_title_1
ALCQ.SAE1A,2019.03,10,F,Litres,Litres of Beverage,Beer
ALCQ.SAE1B,2019.03,30,F,Litres,Litres of Beverage,Wine
ALCQ.SAE1A,2019.06,20,F,Litres,Litres of Beverage,Beer
ALCQ.SAE1B,2019.06,20,F,Litres,Litres of Beverage,Wine
ALCQ.SAE1A,2020.03,30,F,Litres,Litres of Beverage,Beer
ALCQ.SAE1B,2020.03,10,F,Litres,Litres of Beverage,Wine
ALCQ.SAE2A,2019.03,200,F,Litres,Litres of Alcohol,Spirits
ALCQ.SAE2B,2019.03,80,F,ProofL,Litres of Alcohol,Spirits
ALCQ.SAE2A,2019.06,..,F,Litres,Litres of Alcohol,Spirits
ALCQ.SAE2B,2019.06,70,F,ProofL,Litres of Alcohol,Spirits
";

fn write_source() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SOURCE.as_bytes()).unwrap();
    file
}

#[test]
fn test_bootstrap_overview() {
    let file = write_source();
    let loaded = bootstrap(file.path()).unwrap();
    assert_eq!(loaded.model.len(), 10);
    let lines = model_overview(&loaded);
    assert_eq!(lines[1], "Records: 10 (1 not reported)");
    assert_eq!(lines[2], "Years: 2019-2020");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_missing_source_reports_load_failure() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.csv");
    let error = bootstrap(&missing).unwrap_err();
    assert!(format!("{error:#}").starts_with("Failed to load data: CSV file not found"));
    assert!(matches!(
        error.downcast_ref::<IngestError>(),
        Some(IngestError::FileNotFound { .. })
    ));
}

#[test]
fn test_composition_export() {
    let file = write_source();
    let dir = TempDir::new().unwrap();
    let export = dir.path().join("out").join("composition.csv");
    let loaded = bootstrap(file.path()).unwrap();

    let outcome = run_view(
        loaded.model,
        ViewRequest::Composition(CompositionParams::new("litres-of-beverage")),
        Some(&export),
    )
    .unwrap();

    assert_eq!(outcome.exported.as_deref(), Some(export.as_path()));
    assert_eq!(outcome.table.name, "composition-litres-of-beverage-decade");
    assert_snapshot!(view_headline(&outcome.state).join("\n"), @r"
    Group: Litres of Beverage
    Buckets: 2 by decade, 2 series
    ");
    assert_snapshot!(fs::read_to_string(&export).unwrap(), @r"
    bucket,series,value,share,total
    2010-2019,Beer,30,0.375,80
    2010-2019,Wine,50,0.625,80
    2020-2029,Beer,30,0.75,40
    2020-2029,Wine,10,0.25,40
    ");
}

#[test]
fn test_crossover_touch_is_exact() {
    let file = write_source();
    let loaded = bootstrap(file.path()).unwrap();
    let outcome = run_view(
        loaded.model,
        ViewRequest::Crossover(CrossoverParams::new("litres-of-beverage").with_window(0)),
        None,
    )
    .unwrap();
    assert!(outcome.exported.is_none());
    let ViewState::Crossover(frame) = &outcome.state else {
        panic!("unexpected state: {:?}", outcome.state.kind());
    };
    assert_eq!(frame.crossovers.len(), 1);
    let row = &outcome.table.rows()[0];
    assert_eq!(row.get("date").unwrap().to_cell(), "2019-06-01");
    assert_eq!(row.get("kind").unwrap().to_cell(), "exact");
    assert_eq!(row.get("value").unwrap().to_cell(), "20");
}

#[test]
fn test_unit_check_headline() {
    let file = write_source();
    let loaded = bootstrap(file.path()).unwrap();
    let request = ViewRequest::UnitCheck(UnitCheckParams::new(
        SeriesSelector::new("spirits").with_units("Litres"),
        SeriesSelector::new("spirits").with_units("ProofL"),
    ));
    let outcome = run_view(loaded.model, request, None).unwrap();
    assert_snapshot!(view_headline(&outcome.state).join("\n"), @r"
    Litres: spirits / proof: spirits
    Ratios: 1 of 2 dates, mean 2.5, min 2.5, max 2.5
    ");
}

#[test]
fn test_unknown_group_names_the_view() {
    let file = write_source();
    let loaded = bootstrap(file.path()).unwrap();
    let error = run_view(
        loaded.model,
        ViewRequest::Composition(CompositionParams::new("litres-of-cider")),
        None,
    )
    .unwrap_err();
    assert_eq!(
        format!("{error:#}"),
        "composition view: unknown group 'litres-of-cider'"
    );
}

#[test]
fn test_composition_of_mixed_units_needs_a_label() {
    let file = write_source();
    let loaded = bootstrap(file.path()).unwrap();
    let error = run_view(
        loaded.model.clone(),
        ViewRequest::Composition(CompositionParams::new("litres-of-alcohol")),
        None,
    )
    .unwrap_err();
    assert_eq!(
        format!("{error:#}"),
        "composition view: series 'spirits' is reported in both 'Litres' and 'ProofL'; \
         select one units label"
    );

    let outcome = run_view(
        loaded.model,
        ViewRequest::Composition(CompositionParams::new("litres-of-alcohol").with_units("Litres")),
        None,
    )
    .unwrap();
    let ViewState::Composition(frame) = &outcome.state else {
        panic!("unexpected state: {:?}", outcome.state.kind());
    };
    assert_eq!(frame.series[0].units, "Litres");
    assert_eq!(frame.buckets.len(), 1);
    assert_eq!(frame.buckets[0].total, 200.0);
}

#[test]
fn test_options_from_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("options.json");
    fs::write(&path, r#"{ "smoothing_window": 2, "measure": "share" }"#).unwrap();

    let options = load_options(Some(&path)).unwrap();
    assert_eq!(options.smoothing_window, 2);
    assert_eq!(options.measure, Measure::Share);
    assert_eq!(options.bucket_mode, BucketMode::Decade);

    assert_eq!(load_options(None).unwrap().smoothing_window, 4);

    fs::write(&path, "{ not json").unwrap();
    assert!(load_options(Some(&path)).is_err());
}
