//! Error types for the ZRL Manager server.
//!
//! Domain errors live in their own modules and are aggregated by [`Error`] through
//! `thiserror`'s `#[from]` conversions. Every error implements `IntoResponse` so handlers
//! can return `Result<impl IntoResponse, Error>` and propagate with `?`.

pub mod auth;
pub mod config;
pub mod import;
pub mod lineup;
pub mod report;
pub mod retry;
pub mod validation;
pub mod wtrl;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, import::ImportError, lineup::LineupError,
        report::ReportError, validation::ValidationError, wtrl::WtrlError,
    },
};

/// Main error type for the server application.
///
/// Aggregates the domain errors and the external library errors into a single type so
/// the `?` operator works across repositories, services and controllers.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication or authorization failure.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Lineup rule violation (size cap, double booking, bad date).
    #[error(transparent)]
    LineupError(#[from] LineupError),
    /// Invalid user input on a form-style endpoint.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// Failure talking to the WTRL API or decoding its payloads.
    #[error(transparent)]
    WtrlError(#[from] WtrlError),
    /// Report selection or export failure.
    #[error(transparent)]
    ReportError(#[from] ReportError),
    /// Import could not be started.
    #[error(transparent)]
    ImportError(#[from] ImportError),
    /// A requested record does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in the server's code.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// Filesystem error (TRC list, snapshots).
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Maps errors to HTTP responses.
///
/// Domain errors provide their own mapping; everything else becomes a logged
/// 500 Internal Server Error with a generic body.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::LineupError(err) => err.into_response(),
            Self::ValidationError(err) => err.into_response(),
            Self::ReportError(err) => err.into_response(),
            Self::ImportError(err) => err.into_response(),
            Self::NotFound(message) => {
                tracing::debug!("{}", message);

                (StatusCode::NOT_FOUND, Json(ErrorDto { error: message })).into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds a JSON error response with the given status code.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic message to the client so internal
/// details are not leaked.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
