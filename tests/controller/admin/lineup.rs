use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use zrl_manager::{
    model::lineup::{LineupDto, SaveLineupDto},
    server::{
        controller::{
            admin::lineup::{get_lineup, remove_rider, save_lineup},
            util::guard::UNAUTHORIZED_FLASH_MESSAGE,
        },
        model::{role::Role, session::flash::SessionFlash},
    },
};

use super::*;

static RACE_DATE: &str = "2025-11-04";

async fn team_with_riders(test: &TestContext, trc: i32, captain: i64, count: i64) -> Result<(), TestError> {
    test.league()
        .insert_captained_team(trc, &format!("Team {}", trc), Some("A1"), captain, "Cap")
        .await?;
    for n in 1..=count {
        let profile_id = i64::from(trc) * 100 + n;
        test.league()
            .insert_rider(trc, profile_id, &format!("Rider {}", profile_id))
            .await?;
    }

    Ok(())
}

fn selection(trc: i32, count: i64) -> Json<SaveLineupDto> {
    Json(SaveLineupDto {
        profile_ids: (1..=count).map(|n| i64::from(trc) * 100 + n).collect(),
    })
}

/// Expected: 200 with a success flash, then the lineup lists the selection
#[tokio::test]
async fn saves_and_reads_lineup() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    team_with_riders(&test, 10, 1, 6).await?;
    test.login_as(1, Role::Captain).await?;

    let result = save_lineup(
        State(test.into_app_state()),
        test.session.clone(),
        Path((10, RACE_DATE.to_string())),
        selection(10, 6),
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);

    let flash = SessionFlash::take(&test.session).await.unwrap();
    assert_eq!(flash[0].category, "success");

    let resp = get_lineup(
        State(test.into_app_state()),
        test.session.clone(),
        Path((10, "04/11/2025".to_string())),
    )
    .await
    .unwrap()
    .into_response();
    let lineup: LineupDto = serde_json::from_str(&body_text(resp).await).unwrap();

    assert_eq!(lineup.selected_ids.len(), 6);
    assert_eq!(lineup.race_date, NaiveDate::from_ymd_opt(2025, 11, 4).unwrap());

    Ok(())
}

/// Expected: 400 for a seventh rider
#[tokio::test]
async fn rejects_seven_riders() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    team_with_riders(&test, 10, 1, 7).await?;
    test.login_as(2, Role::Admin).await?;

    let result = save_lineup(
        State(test.into_app_state()),
        test.session.clone(),
        Path((10, RACE_DATE.to_string())),
        selection(10, 7),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expected: 400 naming the rider already fielded by another team that day
#[tokio::test]
async fn rejects_double_booking() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    team_with_riders(&test, 10, 1, 2).await?;
    test.league().insert_team(20, "Other", Some("A2")).await?;
    test.league().insert_rider(20, 1001, "Rider 1001").await?;
    test.league()
        .insert_lineup(20, NaiveDate::from_ymd_opt(2025, 11, 4).unwrap(), 1001)
        .await?;
    test.login_as(2, Role::Admin).await?;

    let result = save_lineup(
        State(test.into_app_state()),
        test.session.clone(),
        Path((10, RACE_DATE.to_string())),
        selection(10, 1),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("Rider 1001"));

    Ok(())
}

/// Expected: a captain of another team is redirected with an "Unauthorized" flash
#[tokio::test]
async fn redirects_foreign_captain() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    team_with_riders(&test, 10, 1, 1).await?;
    test.login_as(3, Role::Captain).await?;

    let result = get_lineup(
        State(test.into_app_state()),
        test.session.clone(),
        Path((10, RACE_DATE.to_string())),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/auth/login"));

    let flash = SessionFlash::take(&test.session).await.unwrap();
    assert_eq!(flash.len(), 1);
    assert_eq!(flash[0].message, UNAUTHORIZED_FLASH_MESSAGE);

    Ok(())
}

/// Expected: 200 when removed, 404 when the rider was not selected
#[tokio::test]
async fn removes_rider() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    team_with_riders(&test, 10, 1, 1).await?;
    test.league()
        .insert_lineup(10, NaiveDate::from_ymd_opt(2025, 11, 4).unwrap(), 1001)
        .await?;
    test.login_as(2, Role::Moderator).await?;

    let removed = remove_rider(
        State(test.into_app_state()),
        test.session.clone(),
        Path((10, RACE_DATE.to_string(), 1001)),
    )
    .await
    .unwrap()
    .into_response();
    let missing = remove_rider(
        State(test.into_app_state()),
        test.session.clone(),
        Path((10, RACE_DATE.to_string(), 1001)),
    )
    .await
    .err()
    .unwrap()
    .into_response();

    assert_eq!(removed.status(), StatusCode::OK);
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    Ok(())
}
