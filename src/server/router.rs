//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every endpoint is registered through utoipa-axum so its annotation lands in the
//! OpenAPI document served with Swagger UI at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `GET /`, `GET /health`
/// - `GET|POST /auth/login`, `GET /auth/logout`
/// - `GET /api/flash`, `GET /api/rosters`, `GET /api/standings`, `GET /api/seasons`
/// - `GET /admin/dashboard`
/// - `GET|POST /admin/manage_lineup/{trc}/{race_date}` and
///   `POST /admin/manage_lineup/{trc}/{race_date}/remove/{profile_id}`
/// - `GET /admin/reports/export`
/// - `GET|POST /admin/users`, `PUT|DELETE /admin/users/{profile_id}`
/// - `POST /admin/wtrl_import/import_{rankings,teams,schedule}`, `GET /admin/wtrl_import/status`
/// - `GET /captain/dashboard`
/// - `GET|POST /rider/availability`
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
///
/// # Example
/// ```ignore
/// let app_state = AppState { db, wtrl_client, imports, import_settings };
/// let router = routes().with_state(app_state).layer(session);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "ZRL Manager", description = "ZRL Manager API"), tags(
        (name = controller::home::HOME_TAG, description = "Landing and health routes"),
        (name = controller::auth::AUTH_TAG, description = "Login and logout"),
        (name = controller::api::LEAGUE_TAG, description = "Public league data and flash messages"),
        (name = controller::admin::ADMIN_TAG, description = "Staff dashboard, lineups, reports, users and imports"),
        (name = controller::captain::CAPTAIN_TAG, description = "Captain dashboard"),
        (name = controller::rider::RIDER_TAG, description = "Rider availability"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::home::index))
        .routes(routes!(controller::home::health))
        .routes(routes!(controller::auth::login_page, controller::auth::login))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::api::get_flash))
        .routes(routes!(controller::api::get_rosters))
        .routes(routes!(controller::api::get_standings))
        .routes(routes!(controller::api::get_seasons))
        .routes(routes!(controller::admin::dashboard::dashboard))
        .routes(routes!(
            controller::admin::lineup::get_lineup,
            controller::admin::lineup::save_lineup
        ))
        .routes(routes!(controller::admin::lineup::remove_rider))
        .routes(routes!(controller::admin::report::export_report))
        .routes(routes!(
            controller::admin::user::list_users,
            controller::admin::user::create_user
        ))
        .routes(routes!(
            controller::admin::user::update_user,
            controller::admin::user::delete_user
        ))
        .routes(routes!(controller::admin::import::import_rankings))
        .routes(routes!(controller::admin::import::import_teams))
        .routes(routes!(controller::admin::import::import_schedule))
        .routes(routes!(controller::admin::import::import_status))
        .routes(routes!(controller::captain::dashboard))
        .routes(routes!(
            controller::rider::get_availability,
            controller::rider::save_availability
        ))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
