use axum::{extract::State, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, dashboard::CaptainDashboardDto},
    server::{
        controller::util::guard::require_role,
        error::Error,
        model::{app::AppState, role::Role},
        service::dashboard::DashboardService,
    },
};

pub static CAPTAIN_TAG: &str = "captain";

/// Next Tuesday race and the riders available for it
#[utoipa::path(
    get,
    path = "/captain/dashboard",
    tag = CAPTAIN_TAG,
    responses(
        (status = 200, description = "Captain dashboard", body = CaptainDashboardDto),
        (status = 303, description = "Not logged in as a captain, redirect to the login page"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_role(&state, &session, &[Role::Captain]).await?;

    let dashboard = DashboardService::new(&state.db)
        .captain_dashboard(&user)
        .await?;

    Ok(Json(dashboard))
}
