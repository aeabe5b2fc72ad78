use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WtrlError {
    /// Transport failure (connect, timeout, body read).
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    /// WTRL answered with a status other than 200/202.
    #[error("WTRL returned HTTP {status} for {url}")]
    UnexpectedStatus { status: StatusCode, url: String },
    /// The body was JSON but not in the expected shape.
    #[error("Unexpected WTRL payload: {0}")]
    InvalidPayload(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
