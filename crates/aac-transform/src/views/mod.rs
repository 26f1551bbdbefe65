//! Analytical views over the shared data model.
//!
//! Every view is a pure function of the model and its parameters. Activating
//! a view computes its derived structure from scratch; there is no
//! incremental update. [`ViewHost`] keeps the latest state of each active
//! view and replaces it wholesale when parameters change.

mod composition;
mod crossover;
mod seasonal;
mod trend;
mod unit_check;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use aac_model::DataModel;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

pub use composition::{CompositionBucket, CompositionFrame, CompositionParams, CompositionView};
pub use crossover::{CrossoverFrame, CrossoverParams, CrossoverView};
pub use seasonal::{HeatCell, HeatRow, SeasonalHeatmap, SeasonalParams, SeasonalView};
pub use trend::{TrendFrame, TrendLine, TrendParams, TrendView};
pub use unit_check::{UnitCheckFrame, UnitCheckParams, UnitCheckPoint, UnitCheckView};

/// The closed set of analytical views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewKind {
    Trend,
    Crossover,
    Composition,
    Seasonal,
    UnitCheck,
}

impl ViewKind {
    pub const ALL: [ViewKind; 5] = [
        ViewKind::Trend,
        ViewKind::Crossover,
        ViewKind::Composition,
        ViewKind::Seasonal,
        ViewKind::UnitCheck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Trend => "trend",
            ViewKind::Crossover => "crossover",
            ViewKind::Composition => "composition",
            ViewKind::Seasonal => "seasonal",
            ViewKind::UnitCheck => "unit-check",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two-phase lifecycle shared by every analytical view.
pub trait AnalysisView {
    type Params;
    type State;

    const KIND: ViewKind;

    /// Compute the view's derived structure from scratch.
    fn activate(&self, model: &DataModel, params: &Self::Params) -> Result<Self::State>;

    /// Release a state produced by [`activate`](Self::activate).
    fn deactivate(&self, state: Self::State) {
        debug!(view = %Self::KIND, "view deactivated");
        drop(state);
    }
}

/// Parameters for one view, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum ViewRequest {
    Trend(TrendParams),
    Crossover(CrossoverParams),
    Composition(CompositionParams),
    Seasonal(SeasonalParams),
    UnitCheck(UnitCheckParams),
}

impl ViewRequest {
    pub fn kind(&self) -> ViewKind {
        match self {
            ViewRequest::Trend(_) => ViewKind::Trend,
            ViewRequest::Crossover(_) => ViewKind::Crossover,
            ViewRequest::Composition(_) => ViewKind::Composition,
            ViewRequest::Seasonal(_) => ViewKind::Seasonal,
            ViewRequest::UnitCheck(_) => ViewKind::UnitCheck,
        }
    }

    /// Activate the matching view.
    pub fn activate(&self, model: &DataModel) -> Result<ViewState> {
        Ok(match self {
            ViewRequest::Trend(p) => ViewState::Trend(TrendView.activate(model, p)?),
            ViewRequest::Crossover(p) => ViewState::Crossover(CrossoverView.activate(model, p)?),
            ViewRequest::Composition(p) => {
                ViewState::Composition(CompositionView.activate(model, p)?)
            }
            ViewRequest::Seasonal(p) => ViewState::Seasonal(SeasonalView.activate(model, p)?),
            ViewRequest::UnitCheck(p) => ViewState::UnitCheck(UnitCheckView.activate(model, p)?),
        })
    }
}

/// The derived structure of one active view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Trend(TrendFrame),
    Crossover(CrossoverFrame),
    Composition(CompositionFrame),
    Seasonal(SeasonalHeatmap),
    UnitCheck(UnitCheckFrame),
}

impl ViewState {
    pub fn kind(&self) -> ViewKind {
        match self {
            ViewState::Trend(_) => ViewKind::Trend,
            ViewState::Crossover(_) => ViewKind::Crossover,
            ViewState::Composition(_) => ViewKind::Composition,
            ViewState::Seasonal(_) => ViewKind::Seasonal,
            ViewState::UnitCheck(_) => ViewKind::UnitCheck,
        }
    }

    fn deactivate(self) {
        match self {
            ViewState::Trend(s) => TrendView.deactivate(s),
            ViewState::Crossover(s) => CrossoverView.deactivate(s),
            ViewState::Composition(s) => CompositionView.deactivate(s),
            ViewState::Seasonal(s) => SeasonalView.deactivate(s),
            ViewState::UnitCheck(s) => UnitCheckView.deactivate(s),
        }
    }
}

#[derive(Debug)]
struct ActiveView {
    request: ViewRequest,
    state: ViewState,
}

/// Owner of the active views over one shared model.
///
/// Holds at most one state per [`ViewKind`]. Applying a request recomputes
/// that view fully; the most recent successful request wins. A request that
/// fails leaves the previous state in place.
#[derive(Debug)]
pub struct ViewHost {
    model: Arc<DataModel>,
    active: BTreeMap<ViewKind, ActiveView>,
}

impl ViewHost {
    pub fn new(model: Arc<DataModel>) -> Self {
        Self {
            model,
            active: BTreeMap::new(),
        }
    }

    pub fn model(&self) -> &DataModel {
        &self.model
    }

    /// Activate or recompute the view the request targets.
    pub fn apply(&mut self, request: ViewRequest) -> Result<&ViewState> {
        let kind = request.kind();
        let state = request.activate(&self.model)?;
        debug!(view = %kind, "view recomputed");
        if let Some(previous) = self.active.remove(&kind) {
            previous.state.deactivate();
        }
        let entry = self
            .active
            .entry(kind)
            .or_insert(ActiveView { request, state });
        Ok(&entry.state)
    }

    pub fn state(&self, kind: ViewKind) -> Option<&ViewState> {
        self.active.get(&kind).map(|view| &view.state)
    }

    /// Parameters the current state of `kind` was computed from.
    pub fn request(&self, kind: ViewKind) -> Option<&ViewRequest> {
        self.active.get(&kind).map(|view| &view.request)
    }

    /// Drop the state of `kind`. Returns whether it was active.
    pub fn deactivate(&mut self, kind: ViewKind) -> bool {
        match self.active.remove(&kind) {
            Some(view) => {
                view.state.deactivate();
                true
            }
            None => false,
        }
    }

    pub fn active_kinds(&self) -> impl Iterator<Item = ViewKind> + '_ {
        self.active.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActiveSet;
    use aac_model::RawRow;
    use aac_normalization::build_model;

    fn host() -> ViewHost {
        let row = |period: &str, series: &str, value: &str| {
            RawRow::new()
                .with("Period", period)
                .with("Group", "Litres of Beverage")
                .with("Series_title_1", series)
                .with("Data_value", value)
                .with("UNITS", "Litres")
        };
        let model = build_model(&[
            row("2016.03", "Beer", "30"),
            row("2016.03", "Wine", "10"),
        ]);
        ViewHost::new(Arc::new(model))
    }

    #[test]
    fn test_apply_replaces_previous_state() {
        let mut host = host();
        host.apply(ViewRequest::Composition(CompositionParams::new(
            "litres-of-beverage",
        )))
        .unwrap();
        let state = host
            .apply(ViewRequest::Composition(
                CompositionParams::new("litres-of-beverage")
                    .with_active(ActiveSet::only(["wine"])),
            ))
            .unwrap();
        match state {
            ViewState::Composition(frame) => assert_eq!(frame.buckets[0].total, 10.0),
            other => panic!("unexpected state: {other:?}"),
        }
        assert_eq!(host.active_kinds().collect::<Vec<_>>(), vec![ViewKind::Composition]);
    }

    #[test]
    fn test_failed_request_keeps_previous_state() {
        let mut host = host();
        host.apply(ViewRequest::Trend(TrendParams::new("litres-of-beverage")))
            .unwrap();
        let err = host.apply(ViewRequest::Trend(TrendParams::new("missing")));
        assert!(err.is_err());
        let request = host.request(ViewKind::Trend).unwrap();
        assert_eq!(
            request,
            &ViewRequest::Trend(TrendParams::new("litres-of-beverage"))
        );
    }

    #[test]
    fn test_views_are_independent() {
        let mut host = host();
        host.apply(ViewRequest::Trend(TrendParams::new("litres-of-beverage")))
            .unwrap();
        host.apply(ViewRequest::Crossover(CrossoverParams::new(
            "litres-of-beverage",
        )))
        .unwrap();
        assert!(host.deactivate(ViewKind::Trend));
        assert!(!host.deactivate(ViewKind::Trend));
        assert!(host.state(ViewKind::Crossover).is_some());
        assert!(host.state(ViewKind::Trend).is_none());
    }

    #[test]
    fn test_view_kind_names() {
        let names: Vec<&str> = ViewKind::ALL.iter().map(ViewKind::as_str).collect();
        assert_eq!(
            names,
            vec!["trend", "crossover", "composition", "seasonal", "unit-check"]
        );
    }
}
