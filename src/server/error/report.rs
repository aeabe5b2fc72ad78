use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{error_response, InternalServerError};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Unknown report type {0:?}")]
    UnknownReportType(String),
    #[error("Unknown export format {0:?}")]
    UnknownFormat(String),
    #[error("No future race")]
    NoFutureRace,
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("Failed to render PDF: {0}")]
    Pdf(String),
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        match self {
            Self::UnknownReportType(_) | Self::UnknownFormat(_) | Self::NoFutureRace => {
                error_response(StatusCode::BAD_REQUEST, self.to_string())
            }
            err => InternalServerError(err).into_response(),
        }
    }
}
