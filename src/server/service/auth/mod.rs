//! Authentication service layer.
//!
//! Password hashing compatible with the league's existing werkzeug hashes and the
//! email/password login check.

pub mod login;
pub mod password;
