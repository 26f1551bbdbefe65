//! Data model for quarterly alcohol availability statistics.
//!
//! - **raw**: [`RawRow`], the string-keyed input row
//! - **record**: [`NormalizedRecord`], the typed record every view consumes
//! - **index**: [`DataModel`], records plus grouping indexes and domains
//! - **options**: [`AnalysisOptions`] shared by the analytical views

pub mod error;
pub mod index;
pub mod options;
pub mod raw;
pub mod record;

pub use error::{ModelError, Result};
pub use index::{DataModel, GroupMeta, SeriesMeta};
pub use options::{AnalysisOptions, BucketMode, DEFAULT_SMOOTHING_WINDOW, Measure};
pub use raw::RawRow;
pub use record::{DEFAULT_MONTH, NormalizedRecord, QUARTER_END_MONTHS, record_date};
