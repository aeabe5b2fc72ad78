//! HTTP controller endpoints for the ZRL Manager web API.
//!
//! Axum handlers for login, the staff and captain dashboards, lineups, reports, user
//! administration, WTRL imports, rider availability and the public league data. Handlers
//! check roles through [`util::guard::require_role`], call a service and return JSON;
//! every endpoint carries a utoipa annotation for the OpenAPI document.

pub mod admin;
pub mod api;
pub mod auth;
pub mod captain;
pub mod home;
pub mod rider;
pub mod util;
