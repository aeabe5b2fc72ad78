//! Outbound client for the WTRL API.
//!
//! Results and league documents are generated on demand by WTRL and answered with
//! `202 Accepted` until ready, so those endpoints go through the polling loop in
//! [`client::WtrlClient::poll`]. Roster and schedule endpoints are plain GETs.

pub mod client;
pub mod de;
pub mod model;
pub mod poll;

pub use client::WtrlClient;
pub use poll::{PollConfig, PollFailure, PollOutcome};
