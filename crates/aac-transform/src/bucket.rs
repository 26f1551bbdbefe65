//! Temporal bucketing by year or decade.

use std::fmt;

use aac_model::BucketMode;
use serde::{Deserialize, Serialize};

/// A year or decade bucket. Ordering follows `start`, so a `BTreeMap` keyed
/// by buckets iterates chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BucketKey {
    /// First year in the bucket.
    pub start: i32,
    pub mode: BucketMode,
}

impl BucketKey {
    /// Bucket containing `year`. Decades use floor division, so year -1
    /// belongs to `-10--1`.
    pub fn for_year(year: i32, mode: BucketMode) -> Self {
        let start = match mode {
            BucketMode::Year => year,
            BucketMode::Decade => year.div_euclid(10) * 10,
        };
        Self { start, mode }
    }

    /// Last year in the bucket.
    pub fn end(&self) -> i32 {
        match self.mode {
            BucketMode::Year => self.start,
            BucketMode::Decade => self.start + 9,
        }
    }

    /// `"2019"` for a year bucket, `"2010-2019"` for a decade.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            BucketMode::Year => write!(f, "{}", self.start),
            BucketMode::Decade => write!(f, "{}-{}", self.start, self.end()),
        }
    }
}
