//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with an `AppState` built from the test context, except
//! in `router` which drives the full route table through `tower::ServiceExt`.

mod admin;
mod auth;
mod rider;
mod router;
mod util;

use axum::{body::to_bytes, http::header, response::Response};
use zrl_test_utils::prelude::*;

use crate::util::TestContextExt;

/// Reads the whole response body as text
async fn body_text(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    String::from_utf8_lossy(&bytes).into_owned()
}

fn location(resp: &Response) -> Option<&str> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}
