//! Header normalization for frames read from CSV.

use polars::prelude::DataFrame;

/// Normalizes a header value: trims whitespace and any byte-order mark.
pub fn normalize_header(value: &str) -> String {
    value.trim().trim_matches('\u{feff}').trim().to_string()
}

/// The frame's column names, normalized, in column order.
pub fn frame_headers(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| normalize_header(name.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Period  "), "Period");
        assert_eq!(normalize_header("\u{feff}Period"), "Period");
    }

    #[test]
    fn test_frame_headers_are_normalized() {
        let df = df!("\u{feff}Period" => ["2019.03"], " Group " => ["Beverage"]).unwrap();
        assert_eq!(frame_headers(&df), vec!["Period", "Group"]);
    }
}
