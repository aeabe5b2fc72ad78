//! Staff pages: dashboard, lineups, reports, user accounts and WTRL imports.

pub mod dashboard;
pub mod import;
pub mod lineup;
pub mod report;
pub mod user;

pub static ADMIN_TAG: &str = "admin";
