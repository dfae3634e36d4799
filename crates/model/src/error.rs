use thiserror::Error;

/// Failure to load or validate a model artifact
///
/// Always fatal at startup; the ingestion loop never sees these.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Cannot read model file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model artifact: {0}")]
    Invalid(String),
}

impl ModelError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}
