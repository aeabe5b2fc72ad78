//! Request and response bodies shared by the HTTP API.

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod import;
pub mod league;
pub mod lineup;
pub mod report;
pub mod user;
