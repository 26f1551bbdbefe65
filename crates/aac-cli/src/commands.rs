use std::path::Path;

use aac_cli::pipeline::{Bootstrap, ViewOutcome, bootstrap, load_options, run_view};
use aac_transform::{
    ActiveSet, CompositionParams, CrossoverParams, SeasonalParams, SeriesSelector, TrendParams,
    UnitCheckParams, ViewRequest,
};
use anyhow::Result;
use tracing::info;

use crate::cli::{
    CompositionArgs, CrossoverArgs, GroupArgs, SeasonalArgs, SourceArgs, TrendArgs, UnitCheckArgs,
};

pub fn run_summary(args: &SourceArgs) -> Result<Bootstrap> {
    let loaded = bootstrap(&args.csv)?;
    info!(
        groups = loaded.model.groups().len(),
        series = loaded.model.series().len(),
        "summary ready"
    );
    Ok(loaded)
}

fn active_set(args: &GroupArgs) -> ActiveSet {
    if args.series.is_empty() {
        ActiveSet::All
    } else {
        ActiveSet::only(args.series.iter().map(String::as_str))
    }
}

fn run(source: &SourceArgs, request: ViewRequest, export: Option<&Path>) -> Result<ViewOutcome> {
    let loaded = bootstrap(&source.csv)?;
    run_view(loaded.model, request, export)
}

pub fn run_trend(args: &TrendArgs, config: Option<&Path>) -> Result<ViewOutcome> {
    let options = load_options(config)?;
    let mut params = TrendParams::from_options(&args.group.group, &options)
        .with_active(active_set(&args.group));
    if let Some(units) = &args.group.units {
        params = params.with_units(units);
    }
    if let Some(measure) = args.measure {
        params = params.with_measure(measure.into());
    }
    if let Some(window) = args.window {
        params = params.with_window(window);
    }
    run(
        &args.source,
        ViewRequest::Trend(params),
        args.export.export.as_deref(),
    )
}

pub fn run_crossover(args: &CrossoverArgs, config: Option<&Path>) -> Result<ViewOutcome> {
    let options = load_options(config)?;
    let mut params = CrossoverParams::from_options(&args.group.group, &options)
        .with_active(active_set(&args.group));
    if let Some(units) = &args.group.units {
        params = params.with_units(units);
    }
    if let Some(window) = args.window {
        params = params.with_window(window);
    }
    run(
        &args.source,
        ViewRequest::Crossover(params),
        args.export.export.as_deref(),
    )
}

pub fn run_composition(args: &CompositionArgs, config: Option<&Path>) -> Result<ViewOutcome> {
    let options = load_options(config)?;
    let mut params = CompositionParams::from_options(&args.group.group, &options)
        .with_active(active_set(&args.group));
    if let Some(units) = &args.group.units {
        params = params.with_units(units);
    }
    if let Some(bucket) = args.bucket {
        params = params.with_bucket_mode(bucket.into());
    }
    run(
        &args.source,
        ViewRequest::Composition(params),
        args.export.export.as_deref(),
    )
}

fn selector(series: &str, group: Option<&str>, units: Option<&str>) -> SeriesSelector {
    let mut selector = SeriesSelector::new(series);
    if let Some(group) = group {
        selector = selector.with_group(group);
    }
    if let Some(units) = units {
        selector = selector.with_units(units);
    }
    selector
}

pub fn run_seasonal(args: &SeasonalArgs) -> Result<ViewOutcome> {
    let params = SeasonalParams::new(selector(
        &args.series,
        args.group.as_deref(),
        args.units.as_deref(),
    ));
    run(
        &args.source,
        ViewRequest::Seasonal(params),
        args.export.export.as_deref(),
    )
}

pub fn run_unit_check(args: &UnitCheckArgs) -> Result<ViewOutcome> {
    let group = args.group.as_deref();
    let params = UnitCheckParams::new(
        selector(&args.litres, group, args.litres_units.as_deref()),
        selector(&args.proof, group, args.proof_units.as_deref()),
    );
    run(
        &args.source,
        ViewRequest::UnitCheck(params),
        args.export.export.as_deref(),
    )
}
