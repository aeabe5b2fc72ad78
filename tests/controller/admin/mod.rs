//! Tests for the staff endpoints.

mod import;
mod lineup;
mod report;
mod user;

use super::*;
