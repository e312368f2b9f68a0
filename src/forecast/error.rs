use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    /// Too few usable rows, or all rows on the same date.
    #[error("need at least {required} rows spanning more than one day, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The regularised normal equations could not be solved.
    #[error("numerical failure: {0}")]
    NumericalError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_message_names_counts() {
        let e = ForecastError::InsufficientData {
            required: 2,
            actual: 1,
        };
        assert_eq!(
            e.to_string(),
            "need at least 2 rows spanning more than one day, got 1"
        );
    }
}
