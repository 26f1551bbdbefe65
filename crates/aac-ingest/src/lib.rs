//! Source data ingestion.
//!
//! This crate reads the published CSV extract into raw rows and bootstraps
//! the shared [`DataModel`](aac_model::DataModel) from it.
//!
//! # Features
//!
//! - **CSV Loading**: size and encoding checks, header validation, all-text reads
//! - **Model Bootstrap**: normalize and index a file in one call
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use aac_ingest::load_model;
//!
//! let loaded = load_model(Path::new("data/alcohol-available.csv"))?;
//! println!("{} records", loaded.model.len());
//! ```

mod csv;
mod error;
mod load;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    MAX_CSV_FILE_SIZE, check_file_size, frame_headers, normalize_header, read_csv_frame,
    read_raw_rows, rows_from_frame, validate_encoding, validate_headers,
};

// === Model Bootstrap ===
pub use aac_normalization::NormalizationStats;
pub use load::{LoadedModel, load_model};
