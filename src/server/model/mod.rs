//! Server application models and type definitions.
//!
//! Application state, database model aliases, user roles and the typed session
//! wrappers used by the controllers.

pub mod app;
pub mod db;
pub mod role;
pub mod session;
