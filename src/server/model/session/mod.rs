//! Session data models and utilities.
//!
//! Type-safe wrappers around tower-sessions keys: the logged-in user (profile id,
//! role, email) and the flash message queue.

pub mod flash;
pub mod user;
