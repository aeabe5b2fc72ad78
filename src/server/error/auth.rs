use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

/// Message shown for every failed login so the caller cannot tell which field was wrong.
pub static INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials or inactive user";
pub static MISSING_CREDENTIALS_MESSAGE: &str = "Please fill in all fields";
pub static LOGIN_PATH: &str = "/auth/login";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("User ID {0:?} not found in database despite having an active session")]
    UserNotInDatabase(i64),
    #[error("User ID {user_id:?} with role {role:?} is not allowed to access this resource")]
    Forbidden { user_id: i64, role: String },
    #[error("Login attempt with missing email or password")]
    MissingCredentials,
    #[error("Login attempt with invalid credentials or for an inactive user")]
    InvalidCredentials,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) | Self::Forbidden { .. } => {
                tracing::debug!("{}", self);

                Redirect::to(LOGIN_PATH).into_response()
            }
            Self::MissingCredentials => {
                error_response(StatusCode::BAD_REQUEST, MISSING_CREDENTIALS_MESSAGE)
            }
            Self::InvalidCredentials => {
                tracing::debug!("{}", self);

                error_response(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS_MESSAGE)
            }
        }
    }
}
