use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, Error},
    model::{
        app::AppState,
        role::Role,
        session::{flash::SessionFlash, user::SessionUser},
    },
    service::{lineup::LineupService, user::UserService},
};

pub static UNAUTHORIZED_FLASH_CATEGORY: &str = "danger";
pub static UNAUTHORIZED_FLASH_MESSAGE: &str = "Unauthorized";

/// Retrieves the session user and checks it holds one of `roles`.
///
/// A failed check queues an "Unauthorized" flash message and returns an [`AuthError`],
/// which responds with a redirect to the login page.
///
/// # Arguments
/// - `state`: Application state with the database connection
/// - `session`: The user's session
/// - `roles`: Roles accepted by the handler
///
/// # Returns
/// - `Ok(SessionUser)`: Logged in with an allowed role and still active in the database
/// - `Err(AuthError::UserNotInSession)`: No user in session
/// - `Err(AuthError::Forbidden)`: The user's role is not in `roles`
/// - `Err(AuthError::UserNotInDatabase)`: The account was deleted or deactivated (session is cleared)
/// - `Err(Error)`: Session or database failures
pub async fn require_role(
    state: &AppState,
    session: &Session,
    roles: &[Role],
) -> Result<SessionUser, Error> {
    let Some(user) = SessionUser::get(session).await? else {
        flash_unauthorized(session).await?;

        return Err(AuthError::UserNotInSession.into());
    };

    if !roles.contains(&user.role) {
        flash_unauthorized(session).await?;

        return Err(AuthError::Forbidden {
            user_id: user.profile_id,
            role: user.role.to_string(),
        }
        .into());
    }

    if UserService::new(&state.db)
        .get_active_user(user.profile_id)
        .await?
        .is_none()
    {
        session.clear().await;

        tracing::debug!(
            "Session cleared for user ID {} with active session but no active account in database",
            user.profile_id
        );

        flash_unauthorized(session).await?;

        return Err(AuthError::UserNotInDatabase(user.profile_id).into());
    }

    Ok(user)
}

/// Checks `user` may manage the lineup of team `trc`.
///
/// A refusal queues the same "Unauthorized" flash message as [`require_role`].
pub async fn require_team_access(
    state: &AppState,
    session: &Session,
    user: &SessionUser,
    trc: i32,
) -> Result<(), Error> {
    match LineupService::new(&state.db).ensure_can_manage(user, trc).await {
        Err(Error::AuthError(e)) => {
            flash_unauthorized(session).await?;

            Err(e.into())
        }
        result => result,
    }
}

async fn flash_unauthorized(session: &Session) -> Result<(), Error> {
    SessionFlash::push(
        session,
        UNAUTHORIZED_FLASH_CATEGORY,
        UNAUTHORIZED_FLASH_MESSAGE,
    )
    .await
}
