use axum::{extract::State, response::IntoResponse, Json};
use serde_json::Value;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        league::AvailabilityDto,
    },
    server::{
        controller::util::guard::require_role,
        error::Error,
        model::{app::AppState, role::Role},
        service::availability::AvailabilityService,
    },
};

pub static RIDER_TAG: &str = "rider";

/// Availability declared by the logged-in rider
#[utoipa::path(
    get,
    path = "/rider/availability",
    tag = RIDER_TAG,
    responses(
        (status = 200, description = "Current availability, empty when never saved", body = AvailabilityDto),
        (status = 303, description = "Not logged in, redirect to the login page"),
        (status = 404, description = "No rider record for this account", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_availability(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_role(&state, &session, &Role::ALL).await?;

    let availability = AvailabilityService::new(&state.db)
        .get(user.profile_id)
        .await?;

    Ok(Json(availability))
}

/// Saves `{availability_data, notes}` for the logged-in rider
///
/// # Responses
/// - 200 (OK): Saved
/// - 400 (Bad Request): `availability_data` is not an object or `notes` is not a string
/// - 404 (Not Found): No rider record for this account
#[utoipa::path(
    post,
    path = "/rider/availability",
    tag = RIDER_TAG,
    request_body = AvailabilityDto,
    responses(
        (status = 200, description = "Availability saved", body = MessageDto),
        (status = 303, description = "Not logged in, redirect to the login page"),
        (status = 400, description = "Invalid availability payload", body = ErrorDto),
        (status = 404, description = "No rider record for this account", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn save_availability(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, Error> {
    let user = require_role(&state, &session, &Role::ALL).await?;

    let reply = AvailabilityService::new(&state.db)
        .save(user.profile_id, body)
        .await?;

    Ok(Json(reply))
}
