//! Bootstrap and view pipeline with explicit stages.
//!
//! 1. **Options**: defaults, optionally overridden by a JSON config file
//! 2. **Load**: read and normalize the source table into one shared model
//! 3. **View**: activate the requested view over the model
//! 4. **Export**: project the view state and optionally write it as CSV
//!
//! The model is built once per invocation and shared by reference.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use aac_ingest::{NormalizationStats, load_model};
use aac_model::{AnalysisOptions, DataModel};
use aac_output::{ExportProjection, ExportTable, write_csv};
use aac_transform::{ViewHost, ViewRequest, ViewState};
use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

// ============================================================================
// Stage 1: Options
// ============================================================================

/// Read view options from a JSON file, or use the defaults.
///
/// Fields missing from the file keep their default values.
pub fn load_options(config: Option<&Path>) -> Result<AnalysisOptions> {
    let Some(path) = config else {
        return Ok(AnalysisOptions::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let options: AnalysisOptions = serde_json::from_str(&text)
        .with_context(|| format!("parse config {}", path.display()))?;
    debug!(path = %path.display(), ?options, "config loaded");
    Ok(options)
}

// ============================================================================
// Stage 2: Load
// ============================================================================

/// The shared model of one invocation.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    pub source: PathBuf,
    pub model: Arc<DataModel>,
    pub stats: NormalizationStats,
}

/// Load the source table and build the shared model.
///
/// A load failure keeps its [`IngestError`](aac_ingest::IngestError) as the
/// root cause, so the full chain reads like its `user_message`.
pub fn bootstrap(path: &Path) -> Result<Bootstrap> {
    let span = info_span!("load", path = %path.display());
    let _guard = span.enter();
    let loaded = load_model(path).context("Failed to load data")?;
    Ok(Bootstrap {
        source: loaded.source,
        model: Arc::new(loaded.model),
        stats: loaded.stats,
    })
}

// ============================================================================
// Stages 3-4: View and export
// ============================================================================

/// Result of running one view.
#[derive(Debug, Clone)]
pub struct ViewOutcome {
    pub state: ViewState,
    pub table: ExportTable,
    /// Where the CSV was written, when an export was requested.
    pub exported: Option<PathBuf>,
}

/// Activate `request` over `model` and optionally export the result.
pub fn run_view(
    model: Arc<DataModel>,
    request: ViewRequest,
    export: Option<&Path>,
) -> Result<ViewOutcome> {
    let kind = request.kind();
    let span = info_span!("view", view = %kind);
    let _guard = span.enter();

    let mut host = ViewHost::new(model);
    let state = host
        .apply(request)
        .with_context(|| format!("{kind} view"))?
        .clone();
    let table = state.project();
    info!(rows = table.len(), "view computed");

    let exported = match export {
        Some(path) => {
            write_csv(&table, path).with_context(|| format!("export {}", path.display()))?;
            Some(path.to_path_buf())
        }
        None => None,
    };
    Ok(ViewOutcome {
        state,
        table,
        exported,
    })
}
