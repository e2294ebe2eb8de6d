use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrendDataError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Response from {url} is not valid JSON")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode explore request")]
    RequestEncode(#[source] serde_json::Error),

    #[error("Response from {0} does not contain a JSON document")]
    MissingPayload(String),

    #[error("Explore response has no TIMESERIES widget for keyword '{0}'")]
    MissingTimeseriesWidget(String),

    #[error("Invalid timestamp '{0}' in timeline data")]
    InvalidTimestamp(String),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
