//! Numeric coercion for data cells.
//!
//! The source marks unreported figures with `..` or leaves the cell blank.
//! Both become `None`, as does anything that does not parse to a finite number.

/// Sentinel the source uses for "not reported".
pub const NOT_REPORTED: &str = "..";

/// Returns true if the cell carries no reported figure.
pub fn is_not_reported(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == NOT_REPORTED
}

/// Parse a data cell to a reported value.
///
/// Returns `None` for a missing cell, a blank cell, the `..` sentinel, text
/// that is not a number, and non-finite results such as `inf` or `NaN`.
pub fn parse_value(value: Option<&str>) -> Option<f64> {
    let value = value?;
    if is_not_reported(value) {
        return None;
    }
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

/// Parse the leading integer of a token (optional sign followed by digits).
///
/// `"2019Q1"` yields `2019`; a token with no leading digits yields `None`.
pub fn parse_leading_int(value: &str) -> Option<i32> {
    let trimmed = value.trim();
    let digits_start = usize::from(trimmed.starts_with(['-', '+']));
    let digits_len = trimmed[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    trimmed[..digits_start + digits_len].parse::<i32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_values() {
        assert_eq!(parse_value(Some("123")), Some(123.0));
        assert_eq!(parse_value(Some("-45.67")), Some(-45.67));
        assert_eq!(parse_value(Some("  0  ")), Some(0.0));
        assert_eq!(parse_value(Some("1.5e3")), Some(1500.0));
    }

    #[test]
    fn test_not_reported() {
        assert_eq!(parse_value(Some("..")), None);
        assert_eq!(parse_value(Some(" .. ")), None);
        assert_eq!(parse_value(Some("")), None);
        assert_eq!(parse_value(Some("   ")), None);
        assert_eq!(parse_value(None), None);
    }

    #[test]
    fn test_unparseable_and_non_finite() {
        assert_eq!(parse_value(Some("abc")), None);
        assert_eq!(parse_value(Some("1,234")), None);
        assert_eq!(parse_value(Some("inf")), None);
        assert_eq!(parse_value(Some("NaN")), None);
    }

    #[test]
    fn test_zero_is_reported() {
        assert_eq!(parse_value(Some("0")), Some(0.0));
        assert!(!is_not_reported("0"));
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("2019"), Some(2019));
        assert_eq!(parse_leading_int("2019Q1"), Some(2019));
        assert_eq!(parse_leading_int("-12x"), Some(-12));
        assert_eq!(parse_leading_int("Q1"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }
}
