//! Utility functions and helpers for server operations.
//!
//! Team name normalisation used to match WTRL payloads against local teams, and date
//! helpers shared by the lineup, dashboard and report services.

pub mod name;
pub mod time;
