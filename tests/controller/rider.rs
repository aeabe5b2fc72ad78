use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use zrl_manager::{
    model::league::AvailabilityDto,
    server::{
        controller::rider::{get_availability, save_availability},
        model::role::Role,
    },
};

use super::*;

/// Expected: a saved declaration is returned by the next GET
#[tokio::test]
async fn saves_and_reads_availability() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    test.league().insert_team(10, "Alpha", Some("A1")).await?;
    test.league().insert_rider(10, 42, "Ann").await?;
    test.login_as(42, Role::User).await?;

    let saved = save_availability(
        State(test.into_app_state()),
        test.session.clone(),
        Json(json!({
            "availability_data": {"tuesday": {"start": "19:00", "end": "20:30"}},
            "notes": "Trainer only"
        })),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(saved.status(), StatusCode::OK);

    let resp = get_availability(State(test.into_app_state()), test.session.clone())
        .await
        .unwrap()
        .into_response();
    let availability: AvailabilityDto = serde_json::from_str(&body_text(resp).await).unwrap();

    assert_eq!(availability.availability_data["tuesday"]["end"], "20:30");
    assert_eq!(availability.notes, "Trainer only");

    Ok(())
}

/// Expected: 400 when availability_data is not an object
#[tokio::test]
async fn rejects_non_object_data() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;
    test.league().insert_team(10, "Alpha", Some("A1")).await?;
    test.league().insert_rider(10, 42, "Ann").await?;
    test.login_as(42, Role::Captain).await?;

    let result = save_availability(
        State(test.into_app_state()),
        test.session.clone(),
        Json(json!({"availability_data": "tuesday"})),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
