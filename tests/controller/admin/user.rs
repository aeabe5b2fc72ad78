use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use zrl_manager::{
    model::user::{UserDto, UserFormDto},
    server::{
        controller::admin::user::{create_user, delete_user, list_users, update_user},
        model::role::Role,
    },
};

use super::*;

fn form(profile_id: &str, email: &str, role: &str, password: Option<&str>) -> Json<UserFormDto> {
    Json(UserFormDto {
        profile_id: profile_id.to_string(),
        email: email.to_string(),
        password: password.map(str::to_string),
        role: role.to_string(),
        team_trc: None,
        active: true,
    })
}

/// Expected: 201 on create, then the user shows up in the list with the new role
#[tokio::test]
async fn creates_updates_and_lists() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    test.login_as(1, Role::Admin).await?;

    let created = create_user(
        State(test.into_app_state()),
        test.session.clone(),
        form("77", "cap@example.com", "captain", Some("pw")),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(created.status(), StatusCode::CREATED);

    let updated = update_user(
        State(test.into_app_state()),
        test.session.clone(),
        Path(77),
        form("77", "cap@example.com", "moderator", None),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(updated.status(), StatusCode::OK);

    let resp = list_users(State(test.into_app_state()), test.session.clone())
        .await
        .unwrap()
        .into_response();
    let users: Vec<UserDto> = serde_json::from_str(&body_text(resp).await).unwrap();

    assert_eq!(users.len(), 2);
    let user = users.iter().find(|u| u.profile_id == 77).unwrap();
    assert_eq!(user.role, "moderator");

    Ok(())
}

/// Expected: 400 for a duplicate email
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    test.login_as(1, Role::Admin).await?;

    let result = create_user(
        State(test.into_app_state()),
        test.session.clone(),
        form("2", "1@example.com", "user", Some("pw")),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expected: admins cannot be deleted, other users can
#[tokio::test]
async fn deletes_non_admins_only() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    test.login_as(1, Role::Admin).await?;
    test.user().insert_user(2, "rider@example.com", "user").await?;

    let admin = delete_user(State(test.into_app_state()), test.session.clone(), Path(1))
        .await
        .err()
        .unwrap()
        .into_response();
    let rider = delete_user(State(test.into_app_state()), test.session.clone(), Path(2))
        .await
        .unwrap()
        .into_response();

    assert_eq!(admin.status(), StatusCode::BAD_REQUEST);
    assert_eq!(rider.status(), StatusCode::OK);

    Ok(())
}
