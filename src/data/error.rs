use thiserror::Error;

/// Failures while talking to the listing or history endpoints.
#[derive(Debug, Error)]
pub enum DataError {
    /// Transport level failure (DNS, TLS, timeout, body read).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A configured base URL that cannot be used for requests.
    #[error("invalid URL {0}")]
    InvalidUrl(String),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body was not the JSON shape we expect.
    #[error("unexpected response shape: {0}")]
    Schema(String),

    /// The provider answered with its own error object.
    #[error("API error [{code}]: {description}")]
    Api { code: String, description: String },

    #[error("no price data returned for {0}")]
    NoData(String),

    #[error("'{0}' is not in the coin listing")]
    UnknownCoin(String),
}

impl From<serde_json::Error> for DataError {
    fn from(e: serde_json::Error) -> Self {
        DataError::Schema(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_formats_code_and_description() {
        let error = DataError::Api {
            code: "Not Found".to_string(),
            description: "No data found, symbol may be delisted".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "API error [Not Found]: No data found, symbol may be delisted"
        );
    }

    #[test]
    fn json_errors_become_schema_errors() {
        let err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        assert!(matches!(DataError::from(err), DataError::Schema(_)));
    }
}
