use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use zrl_manager::{
    model::{api::ErrorDto, auth::LoginDto},
    server::{
        controller::{auth::login, home::index},
        error::auth::INVALID_CREDENTIALS_MESSAGE,
        model::{
            role::Role,
            session::user::{SessionUser, SessionUserRole},
        },
    },
};

use super::*;

fn credentials(email: &str, password: &str) -> Json<LoginDto> {
    Json(LoginDto {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Expected: 303 to the admin dashboard with the role stored in session
#[tokio::test]
async fn redirects_admin_to_dashboard() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    test.user()
        .insert_user(1, "admin@example.com", "admin")
        .await?;

    let result = login(
        State(test.into_app_state()),
        test.session.clone(),
        credentials("admin@example.com", TEST_PASSWORD),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/admin/dashboard"));

    let role = SessionUserRole::get(&test.session).await.unwrap();
    assert_eq!(role, Some(Role::Admin));

    Ok(())
}

/// Expected: captains and plain users land on their own pages
#[tokio::test]
async fn redirects_by_role() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    test.user()
        .insert_user(2, "captain@example.com", "captain")
        .await?;
    test.user().insert_user(3, "rider@example.com", "user").await?;

    let captain = login(
        State(test.into_app_state()),
        test.session.clone(),
        credentials("captain@example.com", TEST_PASSWORD),
    )
    .await
    .unwrap()
    .into_response();
    let rider = login(
        State(test.into_app_state()),
        test.session.clone(),
        credentials("rider@example.com", TEST_PASSWORD),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(location(&captain), Some("/captain/dashboard"));
    assert_eq!(location(&rider), Some("/rider/availability"));

    Ok(())
}

/// Expected: wrong password and unknown email give the same 401 message
#[tokio::test]
async fn uses_generic_failure_message() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    test.user()
        .insert_user(1, "admin@example.com", "admin")
        .await?;

    let mut messages = Vec::new();
    for (email, password) in [
        ("admin@example.com", "wrong"),
        ("nobody@example.com", TEST_PASSWORD),
    ] {
        let result = login(
            State(test.into_app_state()),
            test.session.clone(),
            credentials(email, password),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: ErrorDto = serde_json::from_str(&body_text(resp).await).unwrap();
        messages.push(body.error);
    }

    assert_eq!(messages, vec![INVALID_CREDENTIALS_MESSAGE; 2]);
    assert!(SessionUser::get(&test.session).await.unwrap().is_none());

    Ok(())
}

/// Expected: 401 for a deactivated account even with the right password
#[tokio::test]
async fn rejects_inactive_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    test.user()
        .insert_user_with(1, "old@example.com", "admin", TEST_PASSWORD_HASH, false)
        .await?;

    let result = login(
        State(test.into_app_state()),
        test.session.clone(),
        credentials("old@example.com", TEST_PASSWORD),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expected: 400 when a field is empty
#[tokio::test]
async fn rejects_missing_fields() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;

    let result = login(
        State(test.into_app_state()),
        test.session.clone(),
        credentials("admin@example.com", ""),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expected: the landing page follows the session role
#[tokio::test]
async fn index_redirects_by_session() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;

    let anonymous = index(test.session.clone()).await.unwrap().into_response();
    test.login_as(5, Role::Moderator).await?;
    let moderator = index(test.session.clone()).await.unwrap().into_response();

    assert_eq!(location(&anonymous), Some("/auth/login"));
    assert_eq!(location(&moderator), Some("/admin/dashboard"));

    Ok(())
}
