use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        import::{ImportRankingsParams, ImportScheduleParams, ImportStatusDto, ImportTeamsParams},
    },
    server::{
        controller::{admin::ADMIN_TAG, util::guard::require_role},
        error::Error,
        model::{app::AppState, role::Role},
        service::import::{
            parse_race_number, parse_season, parse_trcs, read_trc_list, ImportJob,
        },
    },
};

/// Starts `job` in the background and answers 202 with its initial status
fn start(state: AppState, job: ImportJob) -> Result<impl IntoResponse, Error> {
    let status = job.spawn(
        state.db,
        state.wtrl_client,
        state.imports,
        state.import_settings.snapshot_dir.clone(),
    )?;

    Ok((StatusCode::ACCEPTED, Json(status)))
}

/// Imports race results and league standings
///
/// Without `class_id` every class is imported; without `race_number` every race of the
/// season is tried.
///
/// # Responses
/// - 202 (Accepted): Import started, poll `/admin/wtrl_import/status` for progress
/// - 400 (Bad Request): Invalid season or race number
/// - 409 (Conflict): Another import is running
#[utoipa::path(
    post,
    path = "/admin/wtrl_import/import_rankings",
    tag = ADMIN_TAG,
    params(ImportRankingsParams),
    responses(
        (status = 202, description = "Import started", body = ImportStatusDto),
        (status = 303, description = "Not an admin, redirect to the login page"),
        (status = 400, description = "Invalid parameters", body = ErrorDto),
        (status = 409, description = "An import is already running", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn import_rankings(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ImportRankingsParams>,
) -> Result<impl IntoResponse, Error> {
    require_role(&state, &session, &[Role::Admin]).await?;

    let season = parse_season(params.season.as_deref(), state.import_settings.default_season)?;
    let race_number = parse_race_number(params.race_number.as_deref())?;
    let class_id = params
        .class_id
        .map(|class_id| class_id.trim().to_string())
        .filter(|class_id| !class_id.is_empty());

    start(
        state,
        ImportJob::Results {
            season,
            class_id,
            race_number,
        },
    )
}

/// Imports team rosters for the given TRCs, or for the configured TRC list
#[utoipa::path(
    post,
    path = "/admin/wtrl_import/import_teams",
    tag = ADMIN_TAG,
    params(ImportTeamsParams),
    responses(
        (status = 202, description = "Import started", body = ImportStatusDto),
        (status = 303, description = "Not an admin, redirect to the login page"),
        (status = 400, description = "Invalid parameters or unreadable TRC list", body = ErrorDto),
        (status = 409, description = "An import is already running", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn import_teams(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ImportTeamsParams>,
) -> Result<impl IntoResponse, Error> {
    require_role(&state, &session, &[Role::Admin]).await?;

    let season = parse_season(params.season.as_deref(), state.import_settings.default_season)?;
    let trcs = match parse_trcs(params.trcs.as_deref())? {
        Some(trcs) => trcs,
        None => read_trc_list(&state.import_settings.team_trc_list).await?,
    };

    start(state, ImportJob::Teams { season, trcs })
}

/// Imports the season calendar for categories A to D
#[utoipa::path(
    post,
    path = "/admin/wtrl_import/import_schedule",
    tag = ADMIN_TAG,
    params(ImportScheduleParams),
    responses(
        (status = 202, description = "Import started", body = ImportStatusDto),
        (status = 303, description = "Not an admin, redirect to the login page"),
        (status = 400, description = "Invalid season", body = ErrorDto),
        (status = 409, description = "An import is already running", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn import_schedule(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ImportScheduleParams>,
) -> Result<impl IntoResponse, Error> {
    require_role(&state, &session, &[Role::Admin]).await?;

    let season = parse_season(params.season.as_deref(), state.import_settings.default_season)?;

    start(state, ImportJob::Schedule { season })
}

/// Progress of the current or last import
#[utoipa::path(
    get,
    path = "/admin/wtrl_import/status",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Import progress", body = ImportStatusDto),
        (status = 303, description = "Not an admin, redirect to the login page"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn import_status(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    require_role(&state, &session, &[Role::Admin]).await?;

    Ok(Json(state.imports.status()))
}
