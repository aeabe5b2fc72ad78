use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, FlashDto},
        auth::LoginDto,
    },
    server::{
        error::{auth::LOGIN_PATH, Error},
        model::{
            app::AppState,
            session::{
                flash::SessionFlash,
                user::{SessionUser, SessionUserId},
            },
        },
        service::auth::login::LoginService,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Login page state for a visitor who is not logged in
#[utoipa::path(
    get,
    path = "/auth/login",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Not logged in, pending flash messages", body = Vec<FlashDto>),
        (status = 303, description = "Already logged in, redirect to the role's dashboard"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login_page(session: Session) -> Result<impl IntoResponse, Error> {
    if let Some(user) = SessionUser::get(&session).await? {
        return Ok(Redirect::to(user.role.home_path()).into_response());
    }

    let flash = SessionFlash::take(&session).await?;

    Ok(Json(flash).into_response())
}

/// Logs in with email and password
///
/// Stores the user's profile ID, role and email in session and redirects to the
/// dashboard for the user's role. Every credential failure answers with the same
/// message.
///
/// # Responses
/// - 303 (See Other): Logged in, redirect to the role's dashboard
/// - 400 (Bad Request): Email or password missing
/// - 401 (Unauthorized): Unknown email, inactive account or wrong password
/// - 500 (Internal Server Error): Database or session error
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 303, description = "Logged in, redirect to the role's dashboard"),
        (status = 400, description = "Missing email or password", body = ErrorDto),
        (status = 401, description = "Invalid credentials or inactive user", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(credentials): Json<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    let user = LoginService::new(&state.db)
        .login(&credentials.email, &credentials.password)
        .await?;

    session.cycle_id().await?;
    SessionUser::insert(&session, &user).await?;

    Ok(Redirect::to(user.role.home_path()))
}

/// Logs the user out by clearing their session
///
/// # Responses
/// - 303 (See Other): Logged out, redirect to the login page
/// - 500 (Internal Server Error): There was an issue clearing the session
#[utoipa::path(
    get,
    path = "/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 303, description = "Logged out, redirect to the login page"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, Error> {
    let maybe_user_id = SessionUserId::get(&session).await?;

    // Clearing a session that was never stored fails in the store
    if maybe_user_id.is_some() {
        session.clear().await;
    }

    Ok(Redirect::to(LOGIN_PATH))
}
