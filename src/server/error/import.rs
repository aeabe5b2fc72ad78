use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("An import is already running")]
    AlreadyRunning,
    #[error("Invalid season {0:?}")]
    InvalidSeason(String),
    #[error("Invalid race number {0:?}")]
    InvalidRaceNumber(String),
    #[error("Invalid TRC {0:?}")]
    InvalidTrc(String),
    #[error("TRC list {path:?} could not be read: {source}")]
    TrcListUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("No TRC to import")]
    EmptyTrcList,
}

impl IntoResponse for ImportError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::AlreadyRunning => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        };

        tracing::warn!("{}", self);

        error_response(status, self.to_string())
    }
}
