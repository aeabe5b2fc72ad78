use axum::{extract::State, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, dashboard::DashboardDto},
    server::{
        controller::{admin::ADMIN_TAG, util::guard::require_role},
        error::Error,
        model::{app::AppState, role::Role},
        service::dashboard::DashboardService,
    },
};

/// Active round and the teams the user manages
#[utoipa::path(
    get,
    path = "/admin/dashboard",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Dashboard for admins, moderators and captains", body = DashboardDto),
        (status = 303, description = "Not authorized, redirect to the login page"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_role(&state, &session, &Role::STAFF).await?;

    let dashboard = DashboardService::new(&state.db).admin_dashboard(&user).await?;

    Ok(Json(dashboard))
}
