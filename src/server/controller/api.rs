//! Public league data and the flash message queue.

use axum::{extract::State, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, FlashDto},
        league::{ClassStandingsDto, RosterDto, SeasonDto},
    },
    server::{
        error::Error,
        model::{app::AppState, session::flash::SessionFlash},
        service::league::LeagueService,
    },
};

pub static LEAGUE_TAG: &str = "league";

/// Pops the flash messages queued for this session
#[utoipa::path(
    get,
    path = "/api/flash",
    tag = LEAGUE_TAG,
    responses(
        (status = 200, description = "Queued messages, oldest first", body = Vec<FlashDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_flash(session: Session) -> Result<impl IntoResponse, Error> {
    let messages = SessionFlash::take(&session).await?;

    Ok(Json(messages))
}

/// Team rosters keyed by category and division, e.g. `A1`
#[utoipa::path(
    get,
    path = "/api/rosters",
    tag = LEAGUE_TAG,
    responses(
        (status = 200, description = "Rosters by class", body = std::collections::BTreeMap<String, RosterDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_rosters(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let rosters = LeagueService::new(&state.db).rosters().await?;

    Ok(Json(rosters))
}

#[utoipa::path(
    get,
    path = "/api/standings",
    tag = LEAGUE_TAG,
    responses(
        (status = 200, description = "Standings grouped by season and class", body = Vec<ClassStandingsDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_standings(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let standings = LeagueService::new(&state.db).standings().await?;

    Ok(Json(standings))
}

#[utoipa::path(
    get,
    path = "/api/seasons",
    tag = LEAGUE_TAG,
    responses(
        (status = 200, description = "Seasons with their rounds and races", body = Vec<SeasonDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_seasons(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let seasons = LeagueService::new(&state.db).seasons().await?;

    Ok(Json(seasons))
}
