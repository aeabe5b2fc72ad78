use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        user::{UserDto, UserFormDto},
    },
    server::{
        controller::{admin::ADMIN_TAG, util::guard::require_role},
        error::Error,
        model::{app::AppState, role::Role, session::flash::SessionFlash},
        service::user::UserService,
    },
};

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Every account, by email", body = Vec<UserDto>),
        (status = 303, description = "Not an admin, redirect to the login page"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_users(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    require_role(&state, &session, &[Role::Admin]).await?;

    let users = UserService::new(&state.db).list_users().await?;

    Ok(Json(users))
}

/// Creates an account; the password is required
#[utoipa::path(
    post,
    path = "/admin/users",
    tag = ADMIN_TAG,
    request_body = UserFormDto,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 303, description = "Not an admin, redirect to the login page"),
        (status = 400, description = "Invalid or duplicate user", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<UserFormDto>,
) -> Result<impl IntoResponse, Error> {
    require_role(&state, &session, &[Role::Admin]).await?;

    let user = UserService::new(&state.db).create_user(form).await?;
    SessionFlash::push(&session, "success", format!("User {} created", user.email)).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Updates an account; an empty password keeps the current one
#[utoipa::path(
    put,
    path = "/admin/users/{profile_id}",
    tag = ADMIN_TAG,
    params(("profile_id" = i64, Path, description = "Zwift profile ID of the user")),
    request_body = UserFormDto,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 303, description = "Not an admin, redirect to the login page"),
        (status = 400, description = "Invalid user", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    session: Session,
    Path(profile_id): Path<i64>,
    Json(form): Json<UserFormDto>,
) -> Result<impl IntoResponse, Error> {
    require_role(&state, &session, &[Role::Admin]).await?;

    let user = UserService::new(&state.db)
        .update_user(profile_id, form)
        .await?;
    SessionFlash::push(&session, "success", format!("User {} updated", user.email)).await?;

    Ok(Json(user))
}

/// Deletes an account; admin accounts cannot be deleted
#[utoipa::path(
    delete,
    path = "/admin/users/{profile_id}",
    tag = ADMIN_TAG,
    params(("profile_id" = i64, Path, description = "Zwift profile ID of the user")),
    responses(
        (status = 200, description = "User deleted", body = MessageDto),
        (status = 303, description = "Not an admin, redirect to the login page"),
        (status = 400, description = "Admin accounts are protected", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    session: Session,
    Path(profile_id): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    require_role(&state, &session, &[Role::Admin]).await?;

    UserService::new(&state.db).delete_user(profile_id).await?;

    Ok(Json(MessageDto::success("User deleted")))
}
