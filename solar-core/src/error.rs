use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to, or interpreting data from, the forecast API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("forecast request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("forecast API returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse forecast JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("forecast series length mismatch: {times} timestamps, {values} values")]
    LengthMismatch { times: usize, values: usize },

    #[error("forecast contained no hourly data")]
    EmptySeries,

    #[error("unexpected forecast timestamp '{0}'")]
    Timestamp(String),
}

impl UpstreamError {
    /// Transport-level failures that are worth another attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }
}

/// Anything that stops a province selection from producing a payload.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Provincia no válida")]
    UnknownProvince(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
