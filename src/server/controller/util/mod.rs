//! Helpers shared by the controllers.
//!
//! The role guard resolves the logged-in user from the session and checks it against
//! the roles a handler accepts.

pub mod guard;
