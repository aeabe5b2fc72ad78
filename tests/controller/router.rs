use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};
use zrl_manager::server::router::routes;

use super::*;

fn app(test: &TestContext) -> axum::Router {
    routes()
        .with_state(test.into_app_state())
        .layer(SessionManagerLayer::new(MemoryStore::default()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

/// Expected: 200 "ok"
#[tokio::test]
async fn serves_health() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;

    let resp = app(&test).oneshot(get("/health")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "ok");

    Ok(())
}

/// Expected: protected pages redirect anonymous visitors to the login page
#[tokio::test]
async fn redirects_protected_pages() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;

    for uri in [
        "/admin/dashboard",
        "/captain/dashboard",
        "/rider/availability",
        "/admin/reports/export?report_type=teams&format=csv",
    ] {
        let resp = app(&test).oneshot(get(uri)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(location(&resp), Some("/auth/login"), "{}", uri);
    }

    Ok(())
}

/// Expected: public league data and the OpenAPI document are reachable
#[tokio::test]
async fn serves_public_routes() -> Result<(), TestError> {
    let test = TestBuilder::new().with_league_tables().build().await?;

    for uri in ["/api/rosters", "/api/standings", "/api/seasons", "/api/docs/openapi.json"] {
        let resp = app(&test).oneshot(get(uri)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
    }

    Ok(())
}
