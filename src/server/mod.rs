//! Server application core modules.
//!
//! This module contains all server-side functionality for ZRL Manager, including HTTP
//! routing, session-based authentication, database access, the WTRL API client and the
//! import, lineup and reporting services built on top of them.

#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
pub mod wtrl;
