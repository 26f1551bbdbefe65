//! Plain-text headlines printed above the result tables.

use aac_output::{FieldKind, format_number, round_for};
use aac_transform::{CrossoverKind, ViewState};

use crate::pipeline::Bootstrap;

/// One line per fact about a freshly loaded model.
pub fn model_overview(bootstrap: &Bootstrap) -> Vec<String> {
    let model = &bootstrap.model;
    let stats = &bootstrap.stats;
    let mut lines = vec![
        format!("Source: {}", bootstrap.source.display()),
        format!(
            "Records: {} ({} not reported)",
            model.len(),
            stats.not_reported
        ),
    ];
    if let (Some(first), Some(last)) = (model.years().first(), model.years().last()) {
        lines.push(format!("Years: {first}-{last}"));
    }
    if stats.dropped > 0 {
        lines.push(format!("Dropped rows without a series: {}", stats.dropped));
    }
    if stats.year_fallbacks > 0 {
        lines.push(format!(
            "Records without a usable period: {}",
            stats.year_fallbacks
        ));
    }
    lines
}

fn number_or_dash(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), format_number)
}

fn ratio_or_dash(value: Option<f64>) -> String {
    number_or_dash(value.map(|v| round_for(v, FieldKind::Ratio)))
}

/// Lines that summarize a view's state.
pub fn view_headline(state: &ViewState) -> Vec<String> {
    match state {
        ViewState::Trend(frame) => vec![
            format!("Group: {}", frame.group.label),
            format!(
                "Measure: {}, window {}, {} series over {} dates",
                frame.measure,
                frame.window,
                frame.lines.len(),
                frame.dates.len()
            ),
        ],
        ViewState::Crossover(frame) => {
            let exact = frame
                .crossovers
                .iter()
                .filter(|c| c.kind == CrossoverKind::Exact)
                .count();
            vec![
                format!("Group: {}", frame.pivot.group.label),
                format!(
                    "Crossovers: {} ({exact} exact), window {}",
                    frame.crossovers.len(),
                    frame.window
                ),
            ]
        }
        ViewState::Composition(frame) => vec![
            format!("Group: {}", frame.group.label),
            format!(
                "Buckets: {} by {}, {} series",
                frame.buckets.len(),
                frame.bucket_mode,
                frame.series.len()
            ),
        ],
        ViewState::Seasonal(heatmap) => vec![
            format!("Series: {} ({})", heatmap.series.label, heatmap.series.units),
            format!(
                "Years: {}, range {} to {}",
                heatmap.rows.len(),
                number_or_dash(heatmap.min),
                number_or_dash(heatmap.max)
            ),
        ],
        ViewState::UnitCheck(frame) => vec![
            format!(
                "Litres: {} / proof: {}",
                frame.litres.series_key, frame.proof.series_key
            ),
            format!(
                "Ratios: {} of {} dates, mean {}, min {}, max {}",
                frame.summary.count,
                frame.points.len(),
                ratio_or_dash(frame.summary.mean),
                ratio_or_dash(frame.summary.min),
                ratio_or_dash(frame.summary.max)
            ),
        ],
    }
}
