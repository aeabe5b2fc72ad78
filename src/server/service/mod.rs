//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the repositories in [`crate::server::data`].
//! They enforce the league rules (lineup cap, double booking, login), run the WTRL
//! imports in the background and build the read models behind dashboards and reports.

pub mod auth;
pub mod availability;
pub mod dashboard;
pub mod import;
pub mod league;
pub mod lineup;
pub mod report;
pub mod retry;
pub mod user;
