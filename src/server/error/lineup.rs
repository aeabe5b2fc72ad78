use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum LineupError {
    #[error("A lineup can contain at most {max} riders ({selected} selected)")]
    TooManyRiders { max: usize, selected: usize },
    #[error("Riders already in another team's lineup for this date: {}", .0.join(", "))]
    RiderConflict(Vec<String>),
    #[error("Invalid race date {0:?}, expected YYYY-MM-DD or DD/MM/YYYY")]
    InvalidDate(String),
    #[error("No upcoming race found")]
    NoUpcomingRace,
    #[error("Team with TRC {0} not found")]
    TeamNotFound(i32),
    #[error("Rider {profile_id} does not belong to team {trc}")]
    RiderNotInTeam { trc: i32, profile_id: i64 },
}

impl IntoResponse for LineupError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NoUpcomingRace | Self::TeamNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };

        tracing::debug!("{}", self);

        error_response(status, self.to_string())
    }
}
