//! Fail-fast error taxonomy. Nothing here is retried or recovered; every
//! variant terminates the run with a diagnostic.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Required environment variable missing or empty.
    #[error("{0} is empty")]
    Config(&'static str),

    /// A `--start`/`--end` value that is not RFC3339.
    #[error("invalid timestamp {value:?}: {source}")]
    Parse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A `--span` value that is not a signed duration literal.
    #[error("invalid span {0:?}")]
    Span(String),

    /// Request body serialization failed. Internal bug, not user error.
    #[error("serializing search request: {0}")]
    Template(serde_json::Error),

    /// Connection or HTTP-level failure talking to the log store.
    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not decode as a search response.
    #[error("decoding search response: {0}")]
    Decode(serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
