//! Errors raised by view parameters that do not match the model.

use thiserror::Error;

/// A request the model cannot answer. Recoverable; the model is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("unknown group '{key}'")]
    UnknownGroup { key: String },

    #[error("unknown series '{key}'")]
    UnknownSeries { key: String },

    /// One series carries values in more than one unit and no unit was chosen.
    #[error("series '{series}' is reported in both '{first}' and '{second}'; select one units label")]
    MixedUnits {
        series: String,
        first: String,
        second: String,
    },

    /// A series key spans several groups and no group was chosen.
    #[error("series '{series}' appears in groups '{first}' and '{second}'; select one group")]
    AmbiguousSeries {
        series: String,
        first: String,
        second: String,
    },

    /// A sequence passed to the crossover detector does not match the time axis.
    #[error("series '{series}' has {found} values but the time axis has {expected}")]
    LengthMismatch {
        series: String,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TransformError::UnknownGroup {
            key: "litres-of-gin".to_string(),
        };
        assert_eq!(err.to_string(), "unknown group 'litres-of-gin'");

        let err = TransformError::LengthMismatch {
            series: "beer".to_string(),
            expected: 4,
            found: 3,
        };
        assert_eq!(
            err.to_string(),
            "series 'beer' has 3 values but the time axis has 4"
        );

        let err = TransformError::MixedUnits {
            series: "spirits".to_string(),
            first: "Litres".to_string(),
            second: "ProofL".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "series 'spirits' is reported in both 'Litres' and 'ProofL'; select one units label"
        );
    }
}
