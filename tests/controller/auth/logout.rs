use axum::{http::StatusCode, response::IntoResponse};
use zrl_manager::server::{controller::auth::logout, model::session::user::SessionUserId};

use super::*;

/// Expected: 303 to the login page with the user removed from session
#[tokio::test]
async fn clears_session_on_logout() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    SessionUserId::insert(&test.session, 1).await.unwrap();

    let result = logout(test.session.clone()).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/auth/login"));

    let maybe_user_id = SessionUserId::get(&test.session).await.unwrap();
    assert!(maybe_user_id.is_none());

    Ok(())
}

/// Expected: 303 to the login page even without session data
#[tokio::test]
async fn redirects_without_session() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let result = logout(test.session).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    Ok(())
}
