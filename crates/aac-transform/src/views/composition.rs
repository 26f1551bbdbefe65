//! Categorical composition by year or decade.

use std::collections::BTreeMap;

use aac_model::{AnalysisOptions, BucketMode, DataModel, GroupMeta, SeriesMeta};
use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::{AnalysisView, ViewKind};
use crate::bucket::BucketKey;
use crate::error::Result;
use crate::pivot::Pivot;
use crate::share::{add_present, present_sum, shares};
use crate::types::ActiveSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionParams {
    pub group_key: String,
    pub active: ActiveSet,
    pub bucket_mode: BucketMode,
    pub units: Option<String>,
}

impl CompositionParams {
    pub fn new(group_key: impl Into<String>) -> Self {
        Self::from_options(group_key, &AnalysisOptions::default())
    }

    pub fn from_options(group_key: impl Into<String>, options: &AnalysisOptions) -> Self {
        Self {
            group_key: group_key.into(),
            active: ActiveSet::All,
            bucket_mode: options.bucket_mode,
            units: None,
        }
    }

    pub fn with_active(mut self, active: ActiveSet) -> Self {
        self.active = active;
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn with_bucket_mode(mut self, mode: BucketMode) -> Self {
        self.bucket_mode = mode;
        self
    }
}

/// Summed values of every active series within one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionBucket {
    pub key: BucketKey,
    pub label: String,
    /// Aligned with [`CompositionFrame::series`]; absent when the series has
    /// no reported value in the bucket.
    pub sums: Vec<Option<f64>>,
    pub total: f64,
    pub shares: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionFrame {
    pub group: GroupMeta,
    pub bucket_mode: BucketMode,
    pub series: Vec<SeriesMeta>,
    /// Chronological.
    pub buckets: Vec<CompositionBucket>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CompositionView;

impl AnalysisView for CompositionView {
    type Params = CompositionParams;
    type State = CompositionFrame;

    const KIND: ViewKind = ViewKind::Composition;

    fn activate(&self, model: &DataModel, params: &CompositionParams) -> Result<CompositionFrame> {
        let pivot = Pivot::build(
            model,
            &params.group_key,
            &params.active,
            params.units.as_deref(),
        )?;

        let mut sums: BTreeMap<BucketKey, Vec<Option<f64>>> = BTreeMap::new();
        for point in &pivot.points {
            let key = BucketKey::for_year(point.date.year(), params.bucket_mode);
            let slot = sums
                .entry(key)
                .or_insert_with(|| vec![None; pivot.series.len()]);
            for (acc, value) in slot.iter_mut().zip(&point.values) {
                *acc = add_present(*acc, *value);
            }
        }

        let buckets = sums
            .into_iter()
            .map(|(key, sums)| {
                let total = present_sum(sums.iter().copied());
                CompositionBucket {
                    key,
                    label: key.label(),
                    shares: shares(&sums, total),
                    sums,
                    total,
                }
            })
            .collect();

        Ok(CompositionFrame {
            group: pivot.group,
            bucket_mode: params.bucket_mode,
            series: pivot.series,
            buckets,
        })
    }
}
