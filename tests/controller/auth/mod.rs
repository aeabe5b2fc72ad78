//! Tests for login, logout and the landing redirect.

mod login;
mod logout;

use super::*;
