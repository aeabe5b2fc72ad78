use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        lineup::{LineupDto, SaveLineupDto},
    },
    server::{
        controller::{
            admin::ADMIN_TAG,
            util::guard::{require_role, require_team_access},
        },
        error::Error,
        model::{app::AppState, role::Role, session::flash::SessionFlash},
        service::lineup::LineupService,
    },
};

/// Lineup of a team for a race date
///
/// `race_date` is `YYYY-MM-DD`, `DD/MM/YYYY` (URL-encoded) or `next` for the earliest
/// race from today on.
#[utoipa::path(
    get,
    path = "/admin/manage_lineup/{trc}/{race_date}",
    tag = ADMIN_TAG,
    params(
        ("trc" = i32, Path, description = "Team TRC"),
        ("race_date" = String, Path, description = "Race date or `next`")
    ),
    responses(
        (status = 200, description = "Eligible riders, current selection and busy riders", body = LineupDto),
        (status = 303, description = "Not authorized, redirect to the login page"),
        (status = 400, description = "Invalid race date", body = ErrorDto),
        (status = 404, description = "Team or upcoming race not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_lineup(
    State(state): State<AppState>,
    session: Session,
    Path((trc, race_date)): Path<(i32, String)>,
) -> Result<impl IntoResponse, Error> {
    let user = require_role(&state, &session, &Role::STAFF).await?;
    let lineup_service = LineupService::new(&state.db);

    require_team_access(&state, &session, &user, trc).await?;
    let race_date = lineup_service.resolve_race_date(&race_date).await?;

    let lineup = lineup_service.get_lineup(trc, race_date).await?;

    Ok(Json(lineup))
}

/// Replaces the lineup with the selected riders
///
/// # Responses
/// - 200 (OK): Lineup saved, a success flash message is queued
/// - 400 (Bad Request): More than 6 riders, a rider outside the team, or a rider
///   already in another team's lineup on that date
#[utoipa::path(
    post,
    path = "/admin/manage_lineup/{trc}/{race_date}",
    tag = ADMIN_TAG,
    params(
        ("trc" = i32, Path, description = "Team TRC"),
        ("race_date" = String, Path, description = "Race date or `next`")
    ),
    request_body = SaveLineupDto,
    responses(
        (status = 200, description = "Lineup saved", body = MessageDto),
        (status = 303, description = "Not authorized, redirect to the login page"),
        (status = 400, description = "Lineup rule violated", body = ErrorDto),
        (status = 404, description = "Team or upcoming race not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn save_lineup(
    State(state): State<AppState>,
    session: Session,
    Path((trc, race_date)): Path<(i32, String)>,
    Json(body): Json<SaveLineupDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_role(&state, &session, &Role::STAFF).await?;
    let lineup_service = LineupService::new(&state.db);

    require_team_access(&state, &session, &user, trc).await?;
    let race_date = lineup_service.resolve_race_date(&race_date).await?;

    let saved = lineup_service
        .save_lineup(trc, race_date, body.profile_ids)
        .await?;

    let message = format!("Lineup saved with {} riders", saved);
    SessionFlash::push(&session, "success", message.clone()).await?;

    Ok(Json(MessageDto::success(message)))
}

/// Removes one rider from the lineup
#[utoipa::path(
    post,
    path = "/admin/manage_lineup/{trc}/{race_date}/remove/{profile_id}",
    tag = ADMIN_TAG,
    params(
        ("trc" = i32, Path, description = "Team TRC"),
        ("race_date" = String, Path, description = "Race date or `next`"),
        ("profile_id" = i64, Path, description = "Zwift profile ID of the rider")
    ),
    responses(
        (status = 200, description = "Rider removed", body = MessageDto),
        (status = 303, description = "Not authorized, redirect to the login page"),
        (status = 404, description = "Rider not in the lineup", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_rider(
    State(state): State<AppState>,
    session: Session,
    Path((trc, race_date, profile_id)): Path<(i32, String, i64)>,
) -> Result<impl IntoResponse, Error> {
    let user = require_role(&state, &session, &Role::STAFF).await?;
    let lineup_service = LineupService::new(&state.db);

    require_team_access(&state, &session, &user, trc).await?;
    let race_date = lineup_service.resolve_race_date(&race_date).await?;

    if !lineup_service
        .remove_rider(trc, race_date, profile_id)
        .await?
    {
        return Err(Error::NotFound(format!(
            "Rider {} is not in the lineup of team {} on {}",
            profile_id, trc, race_date
        )));
    }

    SessionFlash::push(&session, "success", "Rider removed from lineup").await?;

    Ok(Json(MessageDto::success("Rider removed from lineup")))
}
