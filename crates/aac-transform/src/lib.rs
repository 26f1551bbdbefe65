//! Aggregation engine and analytical views.
//!
//! Turns the shared [`DataModel`](aac_model::DataModel) into the derived
//! structures each analytical view plots.
//!
//! # Overview
//!
//! - **Shares**: member value over bucket total, explicit zero on a zero total
//! - **Smoothing**: trailing moving average that never invents zeros
//! - **Bucketing**: by year or by decade
//! - **Pivot**: a group's active series on one union time axis
//! - **Crossovers**: exact and interpolated pairwise crossings
//! - **Views**: trend, crossover, composition, seasonal and unit-check views
//!   behind the [`AnalysisView`] lifecycle
//!
//! # Example
//!
//! ```ignore
//! use aac_transform::{AnalysisView, CompositionParams, CompositionView};
//!
//! let params = CompositionParams::new("litres-of-beverage");
//! let frame = CompositionView.activate(&model, &params)?;
//! for bucket in &frame.buckets {
//!     println!("{} {}", bucket.label, bucket.total);
//! }
//! ```
//!
//! # Design Principles
//!
//! - **Stateless functions**: every view is a pure function of model and parameters
//! - **Absence propagates**: unreported values stay `None` unless a policy says otherwise
//! - **Deterministic**: `BTreeMap` ordering everywhere, so equal inputs give equal outputs

mod bucket;
mod error;
mod pivot;
mod ratio;
mod share;
mod smoothing;
mod types;

pub mod crossover;
pub mod views;

// Core types
pub use types::{ActiveSet, SeriesSelector, date_from_day_number, day_number};

// Error type
pub use error::{Result, TransformError};

// Aggregation primitives
pub use bucket::BucketKey;
pub use pivot::{Pivot, PivotPoint};
pub use ratio::{RatioSummary, ratio};
pub use share::{add_present, present_sum, share_of, shares};
pub use smoothing::{moving_average, smooth};

// Crossover detection
pub use crossover::{Crossover, CrossoverKind, NamedSeries, detect_crossovers, sort_crossovers};

// Views
pub use views::{
    AnalysisView, CompositionBucket, CompositionFrame, CompositionParams, CompositionView,
    CrossoverFrame, CrossoverParams, CrossoverView, HeatCell, HeatRow, SeasonalHeatmap,
    SeasonalParams, SeasonalView, TrendFrame, TrendLine, TrendParams, TrendView, UnitCheckFrame,
    UnitCheckParams, UnitCheckPoint, UnitCheckView, ViewHost, ViewKind, ViewRequest, ViewState,
};
