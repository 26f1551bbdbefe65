//! CSV reading utilities.

mod header;
mod reader;

pub use header::{frame_headers, normalize_header};
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, read_csv_frame, read_raw_rows, rows_from_frame,
    validate_encoding, validate_headers,
};
