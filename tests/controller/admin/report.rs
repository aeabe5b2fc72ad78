use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use zrl_manager::{
    model::report::ReportParams,
    server::{controller::admin::report::export_report, model::role::Role},
};

use super::*;

fn params(report_type: &str, format: &str) -> Query<ReportParams> {
    Query(ReportParams {
        report_type: Some(report_type.to_string()),
        format: Some(format.to_string()),
        category: None,
        team: None,
    })
}

async fn league(test: &TestContext) -> Result<(), TestError> {
    test.league()
        .insert_captained_team(10, "Alpha", Some("A1"), 1, "Cap")
        .await?;
    test.league().insert_team(20, "Bravo", Some("B1")).await?;
    test.league().insert_rider(10, 101, "Ann").await?;
    test.league().insert_rider(20, 201, "Bob").await?;

    Ok(())
}

/// Expected: CSV served as an attachment named after the report
#[tokio::test]
async fn exports_csv_download() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    league(&test).await?;
    test.login_as(2, Role::Admin).await?;

    let resp = export_report(
        State(test.into_app_state()),
        test.session.clone(),
        params("teams", "csv"),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"report_teams.csv\""
    );
    assert!(resp.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));

    let body = body_text(resp).await;
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines[0], "team,trc,category,captain,n_riders");
    assert_eq!(lines.len(), 3);

    Ok(())
}

/// Expected: HTML rendered inline with both teams
#[tokio::test]
async fn renders_html_inline() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    league(&test).await?;
    test.login_as(2, Role::Moderator).await?;

    let resp = export_report(
        State(test.into_app_state()),
        test.session.clone(),
        params("riders_compact", ""),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.headers()[header::CONTENT_DISPOSITION], "inline");
    let body = body_text(resp).await;
    assert!(body.contains("Ann"));
    assert!(body.contains("Bob"));

    Ok(())
}

/// Expected: 400 for an unknown format
#[tokio::test]
async fn rejects_unknown_format() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    test.login_as(2, Role::Admin).await?;

    let result = export_report(
        State(test.into_app_state()),
        test.session.clone(),
        params("teams", "docx"),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expected: captains are not allowed to export
#[tokio::test]
async fn redirects_captain() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    test.login_as(1, Role::Captain).await?;

    let result = export_report(
        State(test.into_app_state()),
        test.session.clone(),
        params("teams", "csv"),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    Ok(())
}
