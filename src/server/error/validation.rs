use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Invalid role {0:?}")]
    InvalidRole(String),
    #[error("Profile ID must be numeric, got {0:?}")]
    InvalidProfileId(String),
    #[error("Email {0} is already in use")]
    EmailTaken(String),
    #[error("Profile ID {0} is already in use")]
    ProfileIdTaken(i64),
    #[error("Admin users cannot be deleted")]
    AdminDeletion,
    #[error("User {0} not found")]
    UserNotFound(i64),
    #[error("Invalid availability data: {0}")]
    InvalidAvailability(String),
    #[error("No rider record is linked to profile ID {0}")]
    RiderNotFound(i64),
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::UserNotFound(_) | Self::RiderNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };

        error_response(status, self.to_string())
    }
}
