use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use zrl_manager::{
    model::import::{ImportScheduleParams, ImportStatusDto, ImportTeamsParams},
    server::{
        controller::admin::import::{import_schedule, import_status, import_teams},
        model::role::Role,
    },
};

use super::*;

/// Expected: 202 with a running status
#[tokio::test]
async fn accepts_schedule_import() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    test.login_as(1, Role::Admin).await?;
    let state = test.into_app_state();

    let resp = import_schedule(
        State(state.clone()),
        test.session.clone(),
        Query(ImportScheduleParams::default()),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let status: ImportStatusDto = serde_json::from_str(&body_text(resp).await).unwrap();
    assert!(status.is_running);
    assert!(status.message.contains(&TEST_SEASON.to_string()));

    Ok(())
}

/// Expected: 409 while another import holds the tracker
#[tokio::test]
async fn rejects_concurrent_import() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    test.login_as(1, Role::Admin).await?;
    let state = test.into_app_state();
    state.imports.try_start("Busy").unwrap();

    let result = import_teams(
        State(state.clone()),
        test.session.clone(),
        Query(ImportTeamsParams {
            season: None,
            trcs: Some("4411".to_string()),
        }),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let status = import_status(State(state), test.session.clone())
        .await
        .unwrap()
        .into_response();
    let status: ImportStatusDto = serde_json::from_str(&body_text(status).await).unwrap();
    assert_eq!(status.message, "Busy");

    Ok(())
}

/// Expected: 400 when no TRC is given and the TRC list file is missing
#[tokio::test]
async fn requires_trc_list() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    test.login_as(1, Role::Admin).await?;

    let result = import_teams(
        State(test.into_app_state()),
        test.session.clone(),
        Query(ImportTeamsParams::default()),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expected: only admins may start imports
#[tokio::test]
async fn redirects_moderator() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    test.login_as(1, Role::Moderator).await?;

    let result = import_schedule(
        State(test.into_app_state()),
        test.session.clone(),
        Query(ImportScheduleParams::default()),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    Ok(())
}
