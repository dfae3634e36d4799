//! Error types for the gateway crate

use sentinel_ports::SourceError;
use thiserror::Error;

/// REST transport errors
#[derive(Error, Debug)]
pub enum RestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {code} - {msg}")]
    Api { code: i32, msg: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// A failed request means the source is unavailable this cycle; a response
/// we could not read means the sample is malformed.
impl From<RestError> for SourceError {
    fn from(err: RestError) -> Self {
        match err {
            RestError::Http(e) => SourceError::Unavailable(e.to_string()),
            RestError::Api { code, msg } => {
                SourceError::Unavailable(format!("API error {}: {}", code, msg))
            }
            RestError::Parse(msg) => SourceError::Malformed(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_is_unavailable() {
        let err: SourceError = RestError::Api {
            code: -1121,
            msg: "Invalid symbol.".to_string(),
        }
        .into();
        assert_eq!(
            err,
            SourceError::Unavailable("API error -1121: Invalid symbol.".to_string())
        );
    }

    #[test]
    fn test_parse_error_is_malformed() {
        let err: SourceError = RestError::Parse("bad price".to_string()).into();
        assert!(matches!(err, SourceError::Malformed(_)));
    }
}
