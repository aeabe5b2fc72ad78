use axum::response::{IntoResponse, Redirect};
use tower_sessions::Session;

use crate::{
    model::api::ErrorDto,
    server::{
        error::{auth::LOGIN_PATH, Error},
        model::session::user::SessionUser,
    },
};

pub static HOME_TAG: &str = "home";

/// Sends the visitor to their role's dashboard, or to the login page
#[utoipa::path(
    get,
    path = "/",
    tag = HOME_TAG,
    responses(
        (status = 303, description = "Redirect to the role's dashboard or the login page"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn index(session: Session) -> Result<impl IntoResponse, Error> {
    let target = match SessionUser::get(&session).await? {
        Some(user) => user.role.home_path(),
        None => LOGIN_PATH,
    };

    Ok(Redirect::to(target))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = HOME_TAG,
    responses((status = 200, description = "Service is up", body = String)),
)]
pub async fn health() -> &'static str {
    "ok"
}
