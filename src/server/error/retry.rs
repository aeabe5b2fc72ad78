use sea_orm::DbErr;

use super::{wtrl::WtrlError, Error};

/// Strategy for handling errors in a retry context
#[derive(Debug, PartialEq, Eq)]
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (transient failures)
    Retry,
    /// Failed permanently (bad input, bugs)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::WtrlError(WtrlError::Request(reqwest_error)) => match reqwest_error.status() {
                Some(status) if status.is_server_error() => ErrorRetryStrategy::Retry,
                Some(_) => ErrorRetryStrategy::Fail,
                // Network error, timeout or connection issue
                None => ErrorRetryStrategy::Retry,
            },
            Self::WtrlError(WtrlError::UnexpectedStatus { status, .. }) => {
                if status.is_server_error() {
                    ErrorRetryStrategy::Retry
                } else {
                    ErrorRetryStrategy::Fail
                }
            }

            Self::DbErr(db_err) => match db_err {
                // Connection errors are transient
                DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => ErrorRetryStrategy::Retry,
                // Query, type, schema and record errors won't resolve with a retry
                _ => ErrorRetryStrategy::Fail,
            },

            // Session errors could be Redis connection issues
            Self::SessionError(_) | Self::SessionRedisError(_) => ErrorRetryStrategy::Retry,

            Self::WtrlError(_)
            | Self::ConfigError(_)
            | Self::AuthError(_)
            | Self::LineupError(_)
            | Self::ValidationError(_)
            | Self::ReportError(_)
            | Self::ImportError(_)
            | Self::NotFound(_)
            | Self::ParseError(_)
            | Self::InternalError(_)
            | Self::IoError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
