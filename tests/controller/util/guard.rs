use axum::{http::StatusCode, response::IntoResponse};
use zrl_manager::server::{
    controller::util::guard::{require_role, require_team_access, UNAUTHORIZED_FLASH_MESSAGE},
    error::{auth::AuthError, Error},
    model::{
        role::Role,
        session::{
            flash::SessionFlash,
            user::{SessionUserId, SessionUserRole},
        },
    },
};

use super::*;

/// Expected: Ok with the session user when the role is allowed
#[tokio::test]
async fn allows_listed_role() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    let user = test.login_as(10, Role::Captain).await?;

    let result = require_role(&test.into_app_state(), &test.session, &Role::STAFF).await;

    assert_eq!(result.unwrap(), user);

    Ok(())
}

/// Expected: redirect to login with an "Unauthorized" flash when nobody is logged in
#[tokio::test]
async fn redirects_anonymous_session() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;

    let result = require_role(&test.into_app_state(), &test.session, &Role::ALL).await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::UserNotInSession))
    ));
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/auth/login"));

    let flash = SessionFlash::take(&test.session).await.unwrap();
    assert_eq!(flash.len(), 1);
    assert_eq!(flash[0].message, UNAUTHORIZED_FLASH_MESSAGE);

    Ok(())
}

/// Expected: Forbidden for a role outside the list, session kept
#[tokio::test]
async fn rejects_other_roles() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    test.login_as(11, Role::User).await?;

    let result = require_role(&test.into_app_state(), &test.session, &Role::MANAGERS).await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::Forbidden { user_id: 11, .. }))
    ));
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), Some(11));

    Ok(())
}

/// Expected: session cleared when the account no longer exists
#[tokio::test]
async fn clears_session_for_missing_account() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    SessionUserId::insert(&test.session, 12).await.unwrap();
    SessionUserRole::insert(&test.session, Role::Admin)
        .await
        .unwrap();

    let result = require_role(&test.into_app_state(), &test.session, &Role::ALL).await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::UserNotInDatabase(12)))
    ));
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

/// Expected: own team passes quietly, another captain's team is Forbidden with a flash
#[tokio::test]
async fn checks_team_access() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    test.league()
        .insert_captained_team(10, "Alpha", Some("A1"), 20, "Cap")
        .await?;
    test.league().insert_team(11, "Bravo", Some("A2")).await?;
    let user = test.login_as(20, Role::Captain).await?;
    let state = test.into_app_state();

    let own = require_team_access(&state, &test.session, &user, 10).await;
    assert!(own.is_ok());
    assert!(SessionFlash::take(&test.session).await.unwrap().is_empty());

    let other = require_team_access(&state, &test.session, &user, 11).await;
    assert!(matches!(
        other,
        Err(Error::AuthError(AuthError::Forbidden { user_id: 20, .. }))
    ));
    let flash = SessionFlash::take(&test.session).await.unwrap();
    assert_eq!(flash.len(), 1);
    assert_eq!(flash[0].message, UNAUTHORIZED_FLASH_MESSAGE);

    Ok(())
}
