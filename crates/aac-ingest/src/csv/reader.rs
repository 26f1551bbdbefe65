//! CSV file reading into raw rows.
//!
//! The table is read with Polars with schema inference disabled, so every
//! column arrives as text and numeric coercion stays with the normalizer.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use aac_model::RawRow;
use aac_normalization::missing_required_columns;
use polars::prelude::{AnyValue, CsvReadOptions, DataFrame, PolarsError, SerReader};

use crate::error::{IngestError, Result};

use super::header::frame_headers;

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Check file size against a limit.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reject UTF-16 files; UTF-8 with or without BOM is accepted.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = open_file(path)?;
    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Fails with [`IngestError::MissingColumn`] for the first required column
/// that no header satisfies.
pub fn validate_headers(headers: &[String], path: &Path) -> Result<()> {
    match missing_required_columns(headers).first() {
        Some(column) => Err(IngestError::MissingColumn {
            column: (*column).to_string(),
            path: path.to_path_buf(),
        }),
        None => Ok(()),
    }
}

/// Reads a CSV file into a Polars DataFrame with every column as text.
///
/// A file without a header row fails with [`IngestError::EmptyCsv`]; a
/// header-only file yields a frame with no rows.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    let parse_error = |e: PolarsError| match e {
        PolarsError::NoData(_) => IngestError::EmptyCsv {
            path: path.to_path_buf(),
        },
        other => IngestError::CsvParse {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    };
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)
}

/// Converts a cell to its text; nulls and empty cells become `None`.
fn any_to_cell(value: AnyValue<'_>) -> Option<String> {
    let text = match value {
        AnyValue::Null => return None,
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Converts every DataFrame row into a [`RawRow`], in file order.
pub fn rows_from_frame(df: &DataFrame) -> Result<Vec<RawRow>> {
    let names = frame_headers(df);
    let columns = df.get_columns();

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut row = RawRow::new();
        for (name, column) in names.iter().zip(columns) {
            row.insert(name.clone(), any_to_cell(column.get(idx)?));
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Reads a source CSV into raw rows after validating size, encoding and headers.
pub fn read_raw_rows(path: &Path) -> Result<Vec<RawRow>> {
    check_file_size(path, MAX_CSV_FILE_SIZE)?;
    validate_encoding(path)?;
    let df = read_csv_frame(path)?;
    let headers = frame_headers(&df);
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    validate_headers(&headers, path)?;
    if df.height() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read source table"
    );
    rows_from_frame(&df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const HEADER: &str = "Period,Group,Series_title_1,Data_value,UNITS";

    #[test]
    fn test_frame_headers_with_bom() {
        let file = create_temp_csv(&format!("\u{feff}{HEADER}\n2019.03,G,Beer,1,Litres\n"));
        let df = read_csv_frame(file.path()).unwrap();
        let headers = frame_headers(&df);
        assert_eq!(headers[0], "Period");
        assert_eq!(headers.len(), 5);
        let rows = read_raw_rows(file.path()).unwrap();
        assert_eq!(rows[0].get("Period"), Some("2019.03"));
    }

    #[test]
    fn test_quoted_header_field() {
        let file = create_temp_csv(
            "Period,Group,Series_title_1,Data_value,UNITS,\"Note, free text\"\n\
             2019.03,G,Beer,1,Litres,\"a, b\"\n",
        );
        let rows = read_raw_rows(file.path()).unwrap();
        assert_eq!(rows[0].get("Note, free text"), Some("a, b"));
    }

    #[test]
    fn test_empty_file() {
        let file = create_temp_csv("");
        let result = read_raw_rows(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_missing_column_read_from_frame() {
        let file = create_temp_csv("Period,Group,Series_title_1,UNITS\n2019.03,G,Beer,Litres\n");
        match read_raw_rows(file.path()) {
            Err(IngestError::MissingColumn { column, .. }) => assert_eq!(column, "Data_value"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_validate_headers_reports_missing_column() {
        let headers = vec!["Period".to_string(), "Group".to_string()];
        let result = validate_headers(&headers, Path::new("x.csv"));
        match result {
            Err(IngestError::MissingColumn { column, .. }) => assert_eq!(column, "Series_title_1"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_read_raw_rows_keeps_text_and_nulls() {
        let file = create_temp_csv(&format!(
            "{HEADER},Month\n2019.03,Litres of Beverage,Beer,..,Litres,Mar\n2019.06,Litres of Beverage,Beer,,Litres,Jun\n"
        ));
        let rows = read_raw_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Period"), Some("2019.03"));
        assert_eq!(rows[0].get("Data_value"), Some(".."));
        assert_eq!(rows[0].get("Month"), Some("Mar"));
        assert!(rows[1].contains_column("Data_value"));
        assert_eq!(rows[1].get("Data_value"), None);
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let file = create_temp_csv(&format!("{HEADER}\n"));
        let result = read_raw_rows(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = read_raw_rows(Path::new("/nonexistent/aac/source.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_file_size_limit() {
        let file = create_temp_csv(&format!("{HEADER}\n"));
        let result = check_file_size(file.path(), 4);
        assert!(matches!(result, Err(IngestError::FileTooLarge { .. })));
    }
}
