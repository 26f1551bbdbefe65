//! One-shot bootstrap from a source file to a ready [`DataModel`].

use std::path::{Path, PathBuf};

use aac_model::DataModel;
use aac_normalization::{NormalizationStats, normalize_rows};
use tracing::info;

use crate::csv::read_raw_rows;
use crate::error::Result;

/// A model built from one source file, with the counters gathered on the way.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub source: PathBuf,
    pub model: DataModel,
    pub stats: NormalizationStats,
}

/// Load a source CSV, normalize every row and index the result.
///
/// Either the whole file loads and a complete model is returned, or an
/// [`IngestError`](crate::IngestError) describes why it could not be read.
pub fn load_model(path: &Path) -> Result<LoadedModel> {
    let rows = read_raw_rows(path)?;
    let (records, stats) = normalize_rows(&rows);
    let model = DataModel::build(records);
    info!(
        path = %path.display(),
        records = model.len(),
        groups = model.groups().len(),
        series = model.series().len(),
        dropped = stats.dropped,
        "data model built"
    );
    Ok(LoadedModel {
        source: path.to_path_buf(),
        model,
        stats,
    })
}
